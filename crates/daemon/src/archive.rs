// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Safe extraction of a gzip-compressed agent bundle (spec §4.3 step 3, §6).
//!
//! Every member's resolved path is checked against the workspace root
//! *before* anything is written, rejecting absolute members and any
//! `../` escape, the same check `original_source`'s `_safe_extract_tarball`
//! performs against `tarfile`'s member list before calling `extractall`.

use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use oken_core::RunnerError;
use tar::Archive;

/// Extract `bytes` (a gzip tar archive) into `workspace`, rejecting any
/// member whose path would land outside it.
pub fn extract(bytes: &[u8], workspace: &Path) -> Result<(), RunnerError> {
    std::fs::create_dir_all(workspace)
        .map_err(|e| RunnerError::config(format!("failed to create workspace: {e}")))?;
    let workspace_root = workspace
        .canonicalize()
        .map_err(|e| RunnerError::config(format!("failed to resolve workspace: {e}")))?;

    let decoder = GzDecoder::new(bytes);
    let mut archive = Archive::new(decoder);
    let entries = archive
        .entries()
        .map_err(|e| RunnerError::config(format!("invalid tarball: {e}")))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| RunnerError::config(format!("invalid tarball: {e}")))?;
        let member_path = entry.path().map_err(|e| RunnerError::config(format!("invalid tarball: {e}")))?.into_owned();

        if member_path.is_absolute() {
            return Err(RunnerError::config(format!(
                "path traversal detected in tarball: {}",
                member_path.display()
            )));
        }

        let target = safe_join(&workspace_root, &member_path)?;
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| RunnerError::config(format!("failed to create directory for {}: {e}", member_path.display())))?;
        }
        entry
            .unpack(&target)
            .map_err(|e| RunnerError::config(format!("failed to extract {}: {e}", member_path.display())))?;
    }

    Ok(())
}

/// Join `workspace_root` and `relative`, rejecting any result that would
/// escape the root — without requiring the target to already exist (a
/// plain `canonicalize()` of the joined path would fail for files the
/// archive is about to create).
fn safe_join(workspace_root: &Path, relative: &Path) -> Result<PathBuf, RunnerError> {
    let mut resolved = workspace_root.to_path_buf();
    for component in relative.components() {
        use std::path::Component;
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() || !resolved.starts_with(workspace_root) {
                    return Err(RunnerError::config(format!(
                        "path traversal detected in tarball: {}",
                        relative.display()
                    )));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(RunnerError::config(format!(
                    "path traversal detected in tarball: {}",
                    relative.display()
                )));
            }
        }
    }
    if !resolved.starts_with(workspace_root) {
        return Err(RunnerError::config(format!(
            "path traversal detected in tarball: {}",
            relative.display()
        )));
    }
    Ok(resolved)
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
