// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent identifier: a validated, user-supplied name.
//!
//! Unlike identifiers generated internally by the system, an `AgentId` is
//! chosen by the caller at deploy time, so it is validated once at the
//! boundary (`AgentId::parse`) rather than assumed well-formed.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::RunnerError;

/// Maximum length of an agent id, in bytes.
pub const MAX_LEN: usize = 128;

/// Validated agent identifier: 1-128 chars of `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentId(String);

impl AgentId {
    /// Validate and construct an `AgentId` from user input.
    ///
    /// This is the only entry point into the type; every other
    /// constructor in this module trusts a pre-validated string.
    pub fn parse(id: impl Into<String>) -> Result<Self, RunnerError> {
        let id = id.into();
        if id.is_empty() {
            return Err(RunnerError::config("agent_id cannot be empty"));
        }
        if id.len() > MAX_LEN {
            return Err(RunnerError::config(format!(
                "agent_id too long (max {MAX_LEN} characters)"
            )));
        }
        if !id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
            return Err(RunnerError::config(
                "agent_id must contain only alphanumeric characters, hyphens, and underscores",
            ));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The container name this agent is deployed under: `oken-<agent_id>`.
    pub fn container_name(&self) -> String {
        format!("oken-{}", self.0)
    }

    /// The image tag this agent builds to: `oken-agent:<agent_id>`.
    pub fn image_tag(&self) -> String {
        format!("oken-agent:{}", self.0)
    }
}

impl TryFrom<String> for AgentId {
    type Error = RunnerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<AgentId> for String {
    fn from(value: AgentId) -> Self {
        value.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<str> for AgentId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AgentId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for AgentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
