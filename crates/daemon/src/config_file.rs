// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing of a deployed agent's `oken.toml` (spec §4.3 step 4, §6).
//!
//! Mirrors `original_source`'s `_parse_agent_config`: the file must exist,
//! must parse as TOML, and its `[agent]` table must set `name`. Everything
//! else in `AgentConfig` falls back to its documented default via serde.

use std::path::Path;

use oken_core::{AgentConfig, RunnerError};
use serde::Deserialize;

#[derive(Deserialize)]
struct OkenToml {
    #[serde(default)]
    agent: Option<AgentConfig>,
}

/// Read and parse `<workspace>/oken.toml`.
pub fn parse_agent_config(workspace: &Path) -> Result<AgentConfig, RunnerError> {
    let config_path = workspace.join("oken.toml");
    if !config_path.is_file() {
        return Err(RunnerError::config("oken.toml not found in agent tarball"));
    }

    let text = std::fs::read_to_string(&config_path)
        .map_err(|e| RunnerError::config(format!("failed to read oken.toml: {e}")))?;

    let parsed: OkenToml =
        toml::from_str(&text).map_err(|e| RunnerError::config(format!("invalid oken.toml: {e}")))?;

    let config = parsed.agent.unwrap_or_default();
    if config.name.is_empty() {
        return Err(RunnerError::config("oken.toml must specify agent.name"));
    }

    Ok(config)
}

#[cfg(test)]
#[path = "config_file_tests.rs"]
mod tests;
