// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The default [`crate::ContainerDriver`]: shells out to the `docker` CLI.

use std::path::Path;

use async_trait::async_trait;
use oken_core::{AgentConfig, AgentId, EntrypointType};

use crate::error::DriverError;
use crate::recipe::{render_dockerfile, render_wrapper, wrapper_filename};
use crate::{ContainerDriver, EnvVar};

/// Container runtime adapter built on `tokio::process::Command` invocations
/// of the `docker` binary. Stateless: every operation is derived purely
/// from its arguments, no client handle to keep alive.
#[derive(Debug, Clone, Default)]
pub struct DockerCliDriver;

impl DockerCliDriver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContainerDriver for DockerCliDriver {
    async fn ensure_network(&self, name: &str) -> Result<(), DriverError> {
        if run_docker(&["network", "inspect", name]).await.is_ok() {
            tracing::info!(network = name, "using existing network");
            return Ok(());
        }
        run_docker(&["network", "create", "--driver", "bridge", name])
            .await
            .map(|_| ())
            .map_err(DriverError::ContainerError)?;
        tracing::info!(network = name, "created network");
        Ok(())
    }

    async fn build_image(
        &self,
        agent_id: &AgentId,
        dir: &Path,
        config: &AgentConfig,
        entry_type: EntrypointType,
        container_port: u16,
    ) -> Result<String, DriverError> {
        let dockerfile = render_dockerfile(config, entry_type, container_port);
        tokio::fs::write(dir.join("Dockerfile"), &dockerfile)
            .await
            .map_err(|e| DriverError::ContainerError(format!("write Dockerfile: {e}")))?;

        if !matches!(entry_type, EntrypointType::Http) {
            tokio::fs::write(dir.join(wrapper_filename()), render_wrapper())
                .await
                .map_err(|e| DriverError::ContainerError(format!("write wrapper: {e}")))?;
        }

        let image_tag = agent_id.image_tag();
        let dir_str = dir.to_string_lossy().into_owned();

        tracing::info!(agent_id = %agent_id, image_tag, "building image");
        run_docker(&["build", "--rm", "--force-rm", "-t", &image_tag, &dir_str])
            .await
            .map_err(|logs| DriverError::BuildFailed { logs })?;
        Ok(image_tag)
    }

    async fn start_container(
        &self,
        agent_id: &AgentId,
        image_tag: &str,
        network: &str,
        env: &[EnvVar],
    ) -> Result<(String, String), DriverError> {
        let container_name = agent_id.container_name();

        if run_docker(&["inspect", &container_name]).await.is_ok() {
            tracing::info!(container = %container_name, "removing existing container");
            let _ = run_docker(&["rm", "-f", &container_name]).await;
        }

        let label = format!("oken.agent_id={agent_id}");
        let mut args = vec![
            "run".to_string(),
            "-d".to_string(),
            "--name".to_string(),
            container_name.clone(),
            "--network".to_string(),
            network.to_string(),
            "--label".to_string(),
            label,
        ];
        for (key, value) in env {
            args.push("-e".to_string());
            args.push(format!("{key}={value}"));
        }
        args.push(image_tag.to_string());

        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let container_id = run_docker(&arg_refs).await.map_err(DriverError::ContainerError)?;

        tracing::info!(agent_id = %agent_id, container = %container_name, "started container");
        Ok((container_id, container_name))
    }

    async fn stop_container(&self, container_id: &str) -> Result<(), DriverError> {
        if run_docker(&["inspect", container_id]).await.is_err() {
            return Err(DriverError::NotFound);
        }
        let _ = run_docker(&["stop", "-t", "5", container_id]).await;
        let _ = run_docker(&["rm", "-f", container_id]).await;
        Ok(())
    }

    async fn cleanup_image(&self, image_tag: &str) -> Result<(), DriverError> {
        if run_docker(&["image", "inspect", image_tag]).await.is_err() {
            return Err(DriverError::NotFound);
        }
        run_docker(&["rmi", "-f", image_tag]).await.map(|_| ()).map_err(DriverError::ContainerError)
    }

    async fn cleanup_orphans(&self) -> usize {
        let Ok(ids) = run_docker(&["ps", "-aq", "--filter", "label=oken.agent_id"]).await else {
            return 0;
        };
        let mut count = 0;
        for id in ids.lines().filter(|l| !l.is_empty()) {
            match run_docker(&["rm", "-f", id]).await {
                Ok(_) => count += 1,
                Err(e) => tracing::warn!(container = id, error = %e, "failed to clean up orphan"),
            }
        }
        count
    }
}

/// Run a docker CLI command; on failure return stderr (or a synthesized
/// message if the binary itself couldn't be executed).
async fn run_docker(args: &[&str]) -> Result<String, String> {
    let output = tokio::process::Command::new("docker")
        .args(args)
        .output()
        .await
        .map_err(|e| format!("failed to exec docker: {e}"))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!("docker {} failed: {}", args.first().unwrap_or(&""), stderr.trim()))
    }
}
