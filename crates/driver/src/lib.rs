// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Container driver: the interface the core requires of an isolated-runtime
//! adapter, plus one concrete adapter that shells out to `docker` (spec §4.1).
//!
//! The runtime itself is out of scope; this crate exists so the rest of the
//! workspace has something real to drive in tests and in production, the
//! same way every adapter trait upstream ships a working default impl.

mod docker_cli;
mod error;
mod recipe;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use std::path::Path;

use async_trait::async_trait;
use oken_core::{AgentConfig, AgentId, EntrypointType};

pub use docker_cli::DockerCliDriver;
pub use error::DriverError;
pub use recipe::{render_dockerfile, render_wrapper, wrapper_filename};

/// One key=value pair to forward into the container's environment.
pub type EnvVar = (String, String);

/// The operations the agent lifecycle engine needs from a container runtime.
///
/// Implementations must honor the idempotency and NotFound-is-not-an-error
/// contracts spelled out per method — callers (the registry sweep, the
/// deployment pipeline's compensation paths) rely on them to decide what to
/// swallow.
#[async_trait]
pub trait ContainerDriver: Send + Sync {
    /// Create the bridge network `name` if it doesn't already exist. Must
    /// never fail just because the network is already present.
    async fn ensure_network(&self, name: &str) -> Result<(), DriverError>;

    /// Synthesize a build recipe in `dir` and invoke the runtime's build.
    /// Returns the image tag `oken-agent:<agent_id>` on success.
    async fn build_image(
        &self,
        agent_id: &AgentId,
        dir: &Path,
        config: &AgentConfig,
        entry_type: EntrypointType,
        container_port: u16,
    ) -> Result<String, DriverError>;

    /// Start a container named `oken-<agent_id>` from `image_tag` on
    /// `network`, force-removing any existing container of that name first.
    /// Returns `(container_id, container_name)`.
    async fn start_container(
        &self,
        agent_id: &AgentId,
        image_tag: &str,
        network: &str,
        env: &[EnvVar],
    ) -> Result<(String, String), DriverError>;

    /// Stop (5s grace) then remove a container. Not-found is success.
    async fn stop_container(&self, container_id: &str) -> Result<(), DriverError>;

    /// Remove an image. Not-found is success.
    async fn cleanup_image(&self, image_tag: &str) -> Result<(), DriverError>;

    /// Best-effort removal of every container labeled `oken.agent_id`.
    /// Returns the count actually removed; per-container failures are
    /// logged and counted out, never propagated.
    async fn cleanup_orphans(&self) -> usize;
}
