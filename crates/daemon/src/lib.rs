// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! oken daemon library: the deployment pipeline, its adapters, and the
//! supplemental HTTP surface. `main.rs` is a thin binary wrapper around
//! [`run`] so the pipeline itself stays testable as ordinary library code,
//! the same split the teacher's own daemon crate uses (`oj-daemon` ships
//! both a `lib.rs` and a `main.rs`).

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod archive;
pub mod config;
pub mod config_file;
pub mod context;
pub mod pipeline;
pub mod surface;

use std::sync::Arc;

use oken_core::SystemClock;
use oken_driver::DockerCliDriver;
use oken_proxy::HttpInvocationProxy;
use oken_registry::AgentRegistry;
use pipeline::Pipeline;
use tracing_subscriber::EnvFilter;

/// Install the `tracing` subscriber. Idempotent would be nice but isn't
/// required: `main` calls this exactly once.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Bring up the shared container network, purge containers orphaned by a
/// previous crash, start the idle sweep, and serve the HTTP surface until
/// the listener fails. Returns only on a bind failure.
pub async fn run() {
    let config = config::RunnerConfig::from_env();
    tracing::info!(data_dir = %config.data_dir.display(), network = %config.docker_network, "starting okend");

    let driver: Arc<dyn oken_driver::ContainerDriver> = Arc::new(DockerCliDriver::default());
    let proxy: Arc<dyn oken_proxy::InvocationProxy> = Arc::new(HttpInvocationProxy::new(config.invoke_timeout));

    if let Err(e) = driver.ensure_network(&config.docker_network).await {
        tracing::error!(error = %e, "failed to ensure docker network, continuing anyway");
    }

    let purged = driver.cleanup_orphans().await;
    if purged > 0 {
        tracing::info!(count = purged, "purged orphaned containers from a previous run");
    }

    let registry = Arc::new(AgentRegistry::new(SystemClock, driver.clone()));
    registry.start_sweep(config.cleanup_interval);

    let listen_port = config.listen_port;
    let pipeline = Arc::new(Pipeline { registry, driver, proxy, config });
    let app = surface::router(pipeline);

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", listen_port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(port = listen_port, error = %e, "failed to bind http surface");
            return;
        }
    };

    tracing::info!(addr = %listener.local_addr().map(|a| a.to_string()).unwrap_or_default(), "okend ready");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "http surface terminated unexpectedly");
    }
}
