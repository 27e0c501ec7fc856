// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The agent registry: the system's authoritative concurrent state map and
//! its idle sweep (spec §4.4).
//!
//! All mutations run under a single exclusive section — the registry is not
//! the throughput bottleneck, Docker is, so fine-grained per-entry locking
//! buys nothing. The sweep's witness-compare is the one subtle piece: it
//! decides eviction candidates under the lock, then re-confirms each one
//! individually just before acting, so a `Touch` racing the sweep can never
//! lose its container out from under an in-flight invocation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use oken_core::{AgentId, AgentState, Clock, Status, SystemClock};
use oken_driver::ContainerDriver;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct Inner {
    agents: Mutex<HashMap<AgentId, AgentState>>,
}

/// The exclusive-section state map plus sweep lifecycle control.
///
/// Generic over [`Clock`] so tests can drive the idle sweep with
/// [`oken_core::FakeClock`] instead of real sleeps.
pub struct AgentRegistry<C: Clock = SystemClock> {
    inner: Arc<Inner>,
    clock: C,
    driver: Arc<dyn ContainerDriver>,
    sweep: Mutex<Option<(JoinHandle<()>, CancellationToken)>>,
}

impl<C: Clock> AgentRegistry<C> {
    pub fn new(clock: C, driver: Arc<dyn ContainerDriver>) -> Self {
        Self {
            inner: Arc::new(Inner { agents: Mutex::new(HashMap::new()) }),
            clock,
            driver,
            sweep: Mutex::new(None),
        }
    }

    pub fn register(&self, state: AgentState) {
        let agent_id = state.agent_id.clone();
        self.inner.agents.lock().insert(agent_id, state);
    }

    pub fn get(&self, agent_id: &AgentId) -> Option<AgentState> {
        self.inner.agents.lock().get(agent_id).cloned()
    }

    /// Set `last_invoked = now`. No-op if the entry is absent.
    ///
    /// Concurrent invokes of the same id are not otherwise synchronized by
    /// the registry (spec §5) — this only guarantees the witness update
    /// itself is atomic with respect to the sweep.
    pub fn touch(&self, agent_id: &AgentId) {
        if let Some(state) = self.inner.agents.lock().get_mut(agent_id) {
            state.last_invoked = Some(self.clock.now());
        }
    }

    pub fn update_status(&self, agent_id: &AgentId, status: Status) {
        if let Some(state) = self.inner.agents.lock().get_mut(agent_id) {
            state.status = status;
        }
    }

    pub fn update_container(&self, agent_id: &AgentId, container_id: String, container_name: String) {
        if let Some(state) = self.inner.agents.lock().get_mut(agent_id) {
            state.container_id = Some(container_id);
            state.container_name = Some(container_name);
        }
    }

    pub fn unregister(&self, agent_id: &AgentId) -> Option<AgentState> {
        self.inner.agents.lock().remove(agent_id)
    }

    pub fn list(&self) -> Vec<AgentState> {
        self.inner.agents.lock().values().cloned().collect()
    }

    pub fn count_running(&self) -> usize {
        self.inner.agents.lock().values().filter(|s| s.status.is_running()).count()
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Launch the background sweep task, waking every `cleanup_interval`.
    /// Calling this twice without an intervening `stop_sweep` is a
    /// programmer error (spec §4.4).
    pub fn start_sweep(self: &Arc<Self>, cleanup_interval: Duration)
    where
        C: 'static,
    {
        let mut guard = self.sweep.lock();
        assert!(guard.is_none(), "start_sweep called while a sweep is already running");

        let token = CancellationToken::new();
        let registry = Arc::clone(self);
        let task_token = token.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(cleanup_interval);
            ticker.tick().await; // first tick fires immediately; skip it
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = ticker.tick() => registry.sweep_once().await,
                }
            }
        });
        *guard = Some((handle, token));
    }

    /// Cancel the sweep task and wait for it to terminate.
    pub async fn stop_sweep(&self) {
        let taken = self.sweep.lock().take();
        if let Some((handle, token)) = taken {
            token.cancel();
            let _ = handle.await;
        }
    }

    /// One pass of the idle sweep: candidate selection under the lock,
    /// then a per-candidate witness re-check and eviction outside it.
    pub async fn sweep_once(&self) {
        let now = self.clock.now();
        let candidates = self.collect_candidates(now);
        for (agent_id, witness) in candidates {
            self.evict_if_still_idle(&agent_id, witness).await;
        }
    }

    fn collect_candidates(&self, now: Instant) -> Vec<(AgentId, Option<Instant>)> {
        self.inner
            .agents
            .lock()
            .values()
            .filter(|state| state.is_idle_past(now, Duration::from_secs(state.config.warm_timeout)))
            .map(|state| (state.agent_id.clone(), state.last_invoked))
            .collect()
    }

    async fn evict_if_still_idle(&self, agent_id: &AgentId, witness: Option<Instant>) {
        let removed = {
            let mut agents = self.inner.agents.lock();
            match agents.get(agent_id) {
                None => return,
                Some(state) if state.last_invoked != witness => {
                    tracing::info!(%agent_id, "agent was invoked during cleanup, skipping stop");
                    return;
                }
                Some(_) => agents.remove(agent_id),
            }
        };

        let Some(state) = removed else { return };
        if let Some(container_id) = state.container_id {
            match self.driver.stop_container(&container_id).await {
                Ok(()) => tracing::info!(%agent_id, "stopped idle agent"),
                Err(oken_driver::DriverError::NotFound) => {
                    tracing::info!(%agent_id, "idle agent's container was already gone");
                }
                Err(e) => tracing::error!(%agent_id, error = %e, "failed to stop idle agent"),
            }
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
