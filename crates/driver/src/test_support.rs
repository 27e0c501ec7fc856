// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An in-memory [`ContainerDriver`] double, for daemon-level pipeline tests
//! that need a real trait object without a Docker daemon on hand.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`, the same
//! convention `oj-core::test_support` uses for cross-crate test helpers.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use oken_core::{AgentConfig, AgentId, EntrypointType};
use parking_lot::Mutex;

use crate::{ContainerDriver, DriverError, EnvVar};

#[derive(Debug, Clone, Default)]
struct State {
    networks: HashSet<String>,
    images: HashSet<String>,
    /// container_id -> container_name
    containers: HashMap<String, String>,
    next_container_id: u64,
}

/// A [`ContainerDriver`] that tracks images/containers in memory and can be
/// told to fail specific operations, instead of shelling out to `docker`.
#[derive(Clone, Default)]
pub struct FakeContainerDriver {
    state: Arc<Mutex<State>>,
    fail_build: Arc<Mutex<bool>>,
    fail_start: Arc<Mutex<bool>>,
}

impl FakeContainerDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_build(&self) {
        *self.fail_build.lock() = true;
    }

    pub fn fail_next_start(&self) {
        *self.fail_start.lock() = true;
    }

    pub fn has_container_named(&self, name: &str) -> bool {
        self.state.lock().containers.values().any(|n| n == name)
    }

    pub fn has_image(&self, tag: &str) -> bool {
        self.state.lock().images.contains(tag)
    }
}

#[async_trait]
impl ContainerDriver for FakeContainerDriver {
    async fn ensure_network(&self, name: &str) -> Result<(), DriverError> {
        self.state.lock().networks.insert(name.to_string());
        Ok(())
    }

    async fn build_image(
        &self,
        agent_id: &AgentId,
        _dir: &Path,
        _config: &AgentConfig,
        _entry_type: EntrypointType,
        _container_port: u16,
    ) -> Result<String, DriverError> {
        if std::mem::take(&mut *self.fail_build.lock()) {
            return Err(DriverError::BuildFailed { logs: "fake build failure".to_string() });
        }
        let tag = agent_id.image_tag();
        self.state.lock().images.insert(tag.clone());
        Ok(tag)
    }

    async fn start_container(
        &self,
        agent_id: &AgentId,
        _image_tag: &str,
        _network: &str,
        _env: &[EnvVar],
    ) -> Result<(String, String), DriverError> {
        if std::mem::take(&mut *self.fail_start.lock()) {
            return Err(DriverError::ContainerError("fake start failure".to_string()));
        }
        let name = agent_id.container_name();
        let mut state = self.state.lock();
        state.next_container_id += 1;
        let id = format!("fake-{}", state.next_container_id);
        state.containers.insert(id.clone(), name.clone());
        Ok((id, name))
    }

    async fn stop_container(&self, container_id: &str) -> Result<(), DriverError> {
        self.state.lock().containers.remove(container_id);
        Ok(())
    }

    async fn cleanup_image(&self, image_tag: &str) -> Result<(), DriverError> {
        self.state.lock().images.remove(image_tag);
        Ok(())
    }

    async fn cleanup_orphans(&self) -> usize {
        let mut state = self.state.lock();
        let count = state.containers.len();
        state.containers.clear();
        count
    }
}

#[cfg(test)]
#[path = "test_support_tests.rs"]
mod tests;
