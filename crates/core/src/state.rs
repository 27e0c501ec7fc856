// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mutable per-agent runtime state held by the registry (spec §3).

use std::time::Instant;

use crate::config::AgentConfig;
use crate::id::AgentId;

/// Observable lifecycle status of a deployed agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Pending,
    Building,
    Running,
    /// Terminal-ish: the agent failed somewhere in the pipeline. The entry
    /// stays visible (spec §4.3) until the caller stops or redeploys it.
    Error(String),
    Stopped,
}

impl Status {
    /// Lowercase wire value used on listing (spec §6).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Building => "building",
            Self::Running => "running",
            Self::Error(_) => "error",
            Self::Stopped => "stopped",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One live (or once-live) agent's runtime record.
#[derive(Debug, Clone)]
pub struct AgentState {
    pub agent_id: AgentId,
    pub config: AgentConfig,
    pub status: Status,
    pub container_id: Option<String>,
    pub container_name: Option<String>,
    pub created_at: Instant,
    pub last_invoked: Option<Instant>,
}

impl AgentState {
    /// A freshly-validated agent, not yet built (spec §4.3 step 6).
    pub fn pending(agent_id: AgentId, config: AgentConfig, now: Instant) -> Self {
        Self {
            agent_id,
            config,
            status: Status::Building,
            container_id: None,
            container_name: None,
            created_at: now,
            last_invoked: None,
        }
    }

    /// The witness instant for idle-sweep eviction decisions (spec §4.4):
    /// the last invocation time, or creation time if never invoked.
    pub fn activity_witness(&self) -> Instant {
        self.last_invoked.unwrap_or(self.created_at)
    }

    pub fn is_idle_past(&self, now: Instant, warm_timeout: std::time::Duration) -> bool {
        self.status.is_running() && now.saturating_duration_since(self.activity_witness()) > warm_timeout
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
