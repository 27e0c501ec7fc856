// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The deployment pipeline: the ordered steps that take a tarball from an
//! untrusted caller to a running, invokable container (spec §4.3).
//!
//! Each step is logged inside a single `tracing::info_span!("deploy", ...)`
//! for the whole call, the same way `DockerAdapter::spawn` wraps its own
//! multi-step container launch in one span with elapsed-ms logging.

use std::sync::Arc;
use std::time::Instant;

use oken_core::{AgentConfig, AgentId, AgentState, Clock, RunnerError, Status};
use oken_driver::ContainerDriver;
use oken_proxy::InvocationProxy;
use oken_registry::AgentRegistry;
use tracing::Instrument;

use crate::archive;
use crate::config::RunnerConfig;
use crate::config_file;

/// Everything deploy/invoke/stop handlers need, bundled so call sites
/// don't thread four separate `Arc`s through every function signature.
pub struct Pipeline<C: Clock> {
    pub registry: Arc<AgentRegistry<C>>,
    pub driver: Arc<dyn ContainerDriver>,
    pub proxy: Arc<dyn InvocationProxy>,
    pub config: RunnerConfig,
}

/// The terminal outcome of a deploy call — readiness timeout is reported
/// in-band here rather than as an `Err`, per spec §4.3 step 10 and §7.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    pub agent_id: AgentId,
    pub status: Status,
    pub invoke_endpoint: Option<String>,
}

impl<C: Clock> Pipeline<C> {
    pub async fn deploy(&self, agent_id_raw: &str, tarball: &[u8]) -> Result<DeployOutcome, RunnerError> {
        let agent_id = AgentId::parse(agent_id_raw)?;
        let span = tracing::info_span!("deploy", agent_id = %agent_id);
        async {
            let started = Instant::now();

            let workspace = self.config.agent_workspace(agent_id.as_str());
            archive::extract(tarball, &workspace)?;

            let mut agent_config = config_file::parse_agent_config(&workspace)?;
            let entry_type = match agent_config.entrypoint_type {
                Some(t) => t,
                None => {
                    let shape = oken_classifier::classify_file(&workspace, &agent_config.entrypoint)?;
                    agent_config.entrypoint_type = Some(shape);
                    shape
                }
            };

            self.registry.register(AgentState::pending(
                agent_id.clone(),
                agent_config.clone(),
                self.registry.now(),
            ));

            let outcome = self.build_and_start(&agent_id, &workspace, &agent_config, entry_type).await;
            tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "deploy finished");
            outcome
        }
        .instrument(span)
        .await
    }

    async fn build_and_start(
        &self,
        agent_id: &AgentId,
        workspace: &std::path::Path,
        agent_config: &AgentConfig,
        entry_type: oken_core::EntrypointType,
    ) -> Result<DeployOutcome, RunnerError> {
        self.driver.ensure_network(&self.config.docker_network).await.map_err(|e| {
            RunnerError::ContainerError(e.to_string())
        })?;

        let image_tag = match self
            .driver
            .build_image(agent_id, workspace, agent_config, entry_type, self.config.container_port)
            .await
        {
            Ok(tag) => tag,
            Err(e) => {
                let message = e.to_string();
                self.registry.update_status(agent_id, Status::Error(message.clone()));
                return Err(RunnerError::build_failed(message, e.logs().unwrap_or_default()));
            }
        };

        let env = vec![
            ("OKEN_ENTRYPOINT".to_string(), agent_config.entrypoint.clone()),
            ("OKEN_ENTRY_TYPE".to_string(), entry_type.as_str().to_string()),
            ("PORT".to_string(), self.config.container_port.to_string()),
        ];

        let (container_id, container_name) = match self
            .driver
            .start_container(agent_id, &image_tag, &self.config.docker_network, &env)
            .await
        {
            Ok(pair) => pair,
            Err(e) => {
                let message = e.to_string();
                self.registry.update_status(agent_id, Status::Error(message.clone()));
                match self.driver.cleanup_image(&image_tag).await {
                    Ok(()) | Err(oken_driver::DriverError::NotFound) => {}
                    Err(cleanup_err) => {
                        tracing::warn!(%agent_id, error = %cleanup_err, "failed to clean up image after start failure");
                    }
                }
                return Err(RunnerError::ContainerError(message));
            }
        };
        self.registry.update_container(agent_id, container_id.clone(), container_name.clone());

        let ready = self
            .proxy
            .wait_for_ready(&container_name, self.config.container_port, self.config.health_check_timeout)
            .await;
        if !ready {
            let message = "failed to become ready".to_string();
            self.registry.update_status(agent_id, Status::Error(message.clone()));
            match self.driver.stop_container(&container_id).await {
                Ok(()) | Err(oken_driver::DriverError::NotFound) => {}
                Err(e) => tracing::warn!(%agent_id, error = %e, "failed to stop container after readiness timeout"),
            }
            return Ok(DeployOutcome {
                agent_id: agent_id.clone(),
                status: Status::Error(message),
                invoke_endpoint: None,
            });
        }

        self.registry.update_status(agent_id, Status::Running);
        Ok(DeployOutcome {
            agent_id: agent_id.clone(),
            status: Status::Running,
            invoke_endpoint: Some(format!("/invoke/{agent_id}")),
        })
    }

    /// Forward `payload` to a running agent (spec §4.5's invoke-path
    /// preconditions).
    pub async fn invoke(
        &self,
        agent_id_raw: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, RunnerError> {
        let agent_id = AgentId::parse(agent_id_raw)?;
        let state = self.registry.get(&agent_id).ok_or_else(|| RunnerError::AgentNotFound(agent_id.to_string()))?;

        if !state.status.is_running() {
            return Err(RunnerError::AgentNotRunning {
                agent_id: agent_id.to_string(),
                status: state.status.to_string(),
            });
        }
        let container_name = state
            .container_name
            .ok_or_else(|| RunnerError::ContainerError("running agent has no container name".to_string()))?;

        self.registry.touch(&agent_id);

        self.proxy.invoke(&container_name, self.config.container_port, payload).await.map_err(|e| {
            let message = match &e {
                oken_proxy::ProxyError::Remote { body, .. } => body.clone(),
                other => other.to_string(),
            };
            RunnerError::invoke_failed(message, e.status_hint())
        })
    }

    /// Stop a running agent and drop it from the registry (spec §4, §6's
    /// `/stop`: `running → (removed)` via eviction or explicit stop — a
    /// stopped agent is gone, not parked in a `stopped` state).
    pub async fn stop(&self, agent_id_raw: &str) -> Result<(), RunnerError> {
        let agent_id = AgentId::parse(agent_id_raw)?;
        let state = self.registry.get(&agent_id).ok_or_else(|| RunnerError::AgentNotFound(agent_id.to_string()))?;

        if let Some(container_id) = state.container_id {
            match self.driver.stop_container(&container_id).await {
                Ok(()) | Err(oken_driver::DriverError::NotFound) => {}
                Err(e) => return Err(RunnerError::ContainerError(e.to_string())),
            }
        }
        self.registry.unregister(&agent_id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
