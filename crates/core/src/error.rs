// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The error taxonomy shared across every crate in the workspace (spec §7).
//!
//! Each variant carries the machine-readable `code` string and the HTTP
//! status hint an outer surface should map it to, following
//! `original_source`'s `RunnerError` hierarchy (`exceptions.py`) one-to-one.

use thiserror::Error;

/// Errors the core engine can surface to a caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RunnerError {
    #[error("agent {0} not found")]
    AgentNotFound(String),

    #[error("agent {agent_id} is not running (status: {status})")]
    AgentNotRunning { agent_id: String, status: String },

    #[error("failed to build image: {message}")]
    BuildFailed { message: String, logs: String },

    #[error("container operation failed: {0}")]
    ContainerError(String),

    #[error("{0}")]
    ConfigError(String),

    #[error("agent invocation failed: {message}")]
    InvokeFailed { message: String, status_hint: u16 },
}

impl RunnerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    pub fn build_failed(message: impl Into<String>, logs: impl Into<String>) -> Self {
        Self::BuildFailed { message: message.into(), logs: logs.into() }
    }

    pub fn invoke_failed(message: impl Into<String>, status_hint: u16) -> Self {
        Self::InvokeFailed { message: message.into(), status_hint }
    }

    /// Machine-readable error code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AgentNotFound(_) => "AGENT_NOT_FOUND",
            Self::AgentNotRunning { .. } => "AGENT_NOT_RUNNING",
            Self::BuildFailed { .. } => "BUILD_FAILED",
            Self::ContainerError(_) => "CONTAINER_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvokeFailed { .. } => "INVOKE_FAILED",
        }
    }

    /// HTTP status an outer surface should map this error to (spec §7).
    pub fn http_status(&self) -> u16 {
        match self {
            Self::AgentNotFound(_) => 404,
            Self::AgentNotRunning { .. } => 400,
            Self::BuildFailed { .. } => 400,
            Self::ConfigError(_) => 400,
            Self::ContainerError(_) => 500,
            Self::InvokeFailed { status_hint, .. } => *status_hint,
        }
    }

    /// Build log text, present only for `BuildFailed`.
    pub fn build_logs(&self) -> Option<&str> {
        match self {
            Self::BuildFailed { logs, .. } => Some(logs),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
