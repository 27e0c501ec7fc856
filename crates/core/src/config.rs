// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent configuration, parsed from `oken.toml` (spec §3, §6).

use serde::{Deserialize, Serialize};

fn default_python_version() -> String {
    "3.12".to_string()
}

fn default_entrypoint() -> String {
    "main.py".to_string()
}

fn default_warm_timeout() -> u64 {
    300
}

/// One of the three launch shapes a deployed agent can take (spec §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrypointType {
    /// `def handler(input): ...` or `def main(input): ...`
    Handler,
    /// `class FooAgent: def run(self, input): ...`
    Agent,
    /// The user's entrypoint runs its own HTTP server.
    Http,
}

impl EntrypointType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Handler => "handler",
            Self::Agent => "agent",
            Self::Http => "http",
        }
    }
}

impl std::fmt::Display for EntrypointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parsed, immutable `[agent]` table from `oken.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_python_version")]
    pub python_version: String,

    #[serde(default = "default_entrypoint")]
    pub entrypoint: String,

    #[serde(default)]
    pub entrypoint_type: Option<EntrypointType>,

    #[serde(default = "default_warm_timeout")]
    pub warm_timeout: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            python_version: default_python_version(),
            entrypoint: default_entrypoint(),
            entrypoint_type: None,
            warm_timeout: default_warm_timeout(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
