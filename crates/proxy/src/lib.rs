// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Invocation proxy: forwards requests to a running agent container and
//! polls its health endpoint until ready (spec §4.5).

mod error;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use async_trait::async_trait;
pub use error::ProxyError;
use serde_json::Value;

/// Forwarder between the public request surface and a running replica.
#[async_trait]
pub trait InvocationProxy: Send + Sync {
    /// Poll `GET http://<container_name>:<port>/health` once per second, up
    /// to `timeout_seconds` attempts. Transport errors during polling are
    /// swallowed, not propagated — only exhaustion returns `false`.
    async fn wait_for_ready(&self, container_name: &str, port: u16, timeout_seconds: u64) -> bool;

    /// Forward `payload` as `{"input": payload}` to
    /// `POST http://<container_name>:<port>/invoke` and return the parsed
    /// response body.
    async fn invoke(
        &self,
        container_name: &str,
        port: u16,
        payload: Value,
    ) -> Result<Value, ProxyError>;
}

/// [`InvocationProxy`] backed by a single long-lived [`reqwest::Client`],
/// mirroring a single shared `httpx.AsyncClient` reused across calls.
pub struct HttpInvocationProxy {
    client: reqwest::Client,
}

impl HttpInvocationProxy {
    /// Build a client with `invoke_timeout` applied to every request this
    /// proxy makes (the ceiling spec §6 calls `invoke_timeout`).
    pub fn new(invoke_timeout: std::time::Duration) -> Self {
        #[allow(clippy::expect_used)]
        let client = reqwest::Client::builder()
            .timeout(invoke_timeout)
            .build()
            .expect("reqwest client builder with only a timeout never fails");
        Self { client }
    }
}

#[async_trait]
impl InvocationProxy for HttpInvocationProxy {
    async fn wait_for_ready(&self, container_name: &str, port: u16, timeout_seconds: u64) -> bool {
        let url = format!("http://{container_name}:{port}/health");
        for _ in 0..timeout_seconds {
            let healthy = self
                .client
                .get(&url)
                .timeout(std::time::Duration::from_secs(5))
                .send()
                .await
                .is_ok_and(|resp| resp.status().is_success());
            if healthy {
                tracing::info!(container = container_name, "agent is ready");
                return true;
            }
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
        }
        tracing::warn!(container = container_name, "agent failed to become ready");
        false
    }

    async fn invoke(
        &self,
        container_name: &str,
        port: u16,
        payload: Value,
    ) -> Result<Value, ProxyError> {
        let url = format!("http://{container_name}:{port}/invoke");
        tracing::debug!(%url, "invoking agent");

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "input": payload }))
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProxyError::Remote { status: status.as_u16(), body });
        }

        response.json::<Value>().await.map_err(|e| ProxyError::Connect(e.to_string()))
    }
}

fn map_request_error(err: reqwest::Error) -> ProxyError {
    if err.is_timeout() {
        ProxyError::Timeout
    } else {
        ProxyError::Connect(err.to_string())
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
