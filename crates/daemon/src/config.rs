// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration of the core itself, read from the environment (spec §6).
//!
//! No config file for the daemon process — every field is an
//! `OKEN_`-prefixed env var with a spec-mandated default, the same
//! `std::env::var(...).ok().and_then(...)` idiom `oj-daemon::env` uses for
//! `OJ_STATE_DIR`/`OJ_TCP_PORT`/etc.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Root under which per-agent workspaces live.
    pub data_dir: PathBuf,
    /// Bridge network name shared by every agent container.
    pub docker_network: String,
    /// Fallback warm window, used when `oken.toml` doesn't set one.
    pub default_warm_timeout: u64,
    /// Sweep period.
    pub cleanup_interval: Duration,
    /// Port replicas listen on inside their container.
    pub container_port: u16,
    /// Readiness polling ceiling, in attempts (one per second).
    pub health_check_timeout: u64,
    /// Single-invocation ceiling.
    pub invoke_timeout: Duration,
    /// Port `okend`'s own HTTP surface binds to. Not part of spec.md's
    /// configuration table (that table covers the core engine only); added
    /// because an outer surface needs a listen port from somewhere.
    pub listen_port: u16,
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: env_path("OKEN_DATA_DIR").unwrap_or_else(|| PathBuf::from("/tmp/oken")),
            docker_network: env_string("OKEN_DOCKER_NETWORK")
                .unwrap_or_else(|| "oken-agents".to_string()),
            default_warm_timeout: env_u64("OKEN_DEFAULT_WARM_TIMEOUT").unwrap_or(300),
            cleanup_interval: env_u64("OKEN_CLEANUP_INTERVAL")
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(30)),
            container_port: env_u64("OKEN_CONTAINER_PORT").and_then(|v| u16::try_from(v).ok())
                .unwrap_or(8080),
            health_check_timeout: env_u64("OKEN_HEALTH_CHECK_TIMEOUT").unwrap_or(30),
            invoke_timeout: env_u64("OKEN_INVOKE_TIMEOUT")
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(300)),
            listen_port: env_u64("OKEN_LISTEN_PORT").and_then(|v| u16::try_from(v).ok()).unwrap_or(9090),
        }
    }

    /// Workspace directory for a given agent: `<data_dir>/agents/<agent_id>`.
    pub fn agent_workspace(&self, agent_id: &str) -> PathBuf {
        self.data_dir.join("agents").join(agent_id)
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env_string(key).map(PathBuf::from)
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
