// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Entrypoint classifier: static analysis of a user's source file to decide
//! its launch shape (spec §4.2).
//!
//! The classifier is pure — `classify` takes source text and returns a
//! shape with no I/O. `classify_file` is the thin wrapper that reads the
//! entrypoint off disk for the deployment pipeline to call.

mod cues;
mod syntax;

use std::path::Path;

use oken_core::{EntrypointType, RunnerError};

/// Classify Python source text into one of the three launch shapes.
///
/// Decision precedence, first match wins (spec §4.2):
/// 1. http — a recognized web-server construction.
/// 2. agent — an `*Agent*` class defining `run`/`invoke`/`__call__`.
/// 3. handler — a module-level `handler`/`main`/`invoke`/`run` function.
/// 4. otherwise, or if the source does not look syntactically valid: handler.
pub fn classify(source: &str) -> EntrypointType {
    if !syntax::looks_parseable(source) {
        tracing::warn!("entrypoint source does not look syntactically valid, defaulting to handler");
        return EntrypointType::Handler;
    }

    if cues::has_http_server(source) {
        return EntrypointType::Http;
    }
    if cues::has_agent_class(source) {
        return EntrypointType::Agent;
    }
    if cues::has_handler_function(source) {
        return EntrypointType::Handler;
    }
    EntrypointType::Handler
}

/// Classify the entrypoint file at `workspace/entrypoint`.
///
/// A missing file is the caller's configuration error (spec §4.2's
/// degenerate-input table) and is *not* defaulted away like an
/// unparsable-but-present file is.
pub fn classify_file(workspace: &Path, entrypoint: &str) -> Result<EntrypointType, RunnerError> {
    let path = workspace.join(entrypoint);
    let source = std::fs::read_to_string(&path).map_err(|e| {
        RunnerError::config(format!("entrypoint file not found: {} ({e})", path.display()))
    })?;
    Ok(classify(&source))
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
