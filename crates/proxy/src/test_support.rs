// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An in-memory [`InvocationProxy`] double for daemon-level pipeline tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::{InvocationProxy, ProxyError};

#[derive(Default)]
struct State {
    ready: HashMap<String, bool>,
    responses: HashMap<String, Result<Value, ProxyError>>,
    invocations: Vec<(String, Value)>,
}

/// An [`InvocationProxy`] whose readiness and invocation results are
/// pre-programmed per container name, instead of forwarding over HTTP.
#[derive(Clone, Default)]
pub struct FakeInvocationProxy {
    state: Arc<Mutex<State>>,
}

impl FakeInvocationProxy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ready(&self, container_name: &str, ready: bool) {
        self.state.lock().ready.insert(container_name.to_string(), ready);
    }

    pub fn set_response(&self, container_name: &str, response: Result<Value, ProxyError>) {
        self.state.lock().responses.insert(container_name.to_string(), response);
    }

    pub fn invocations(&self) -> Vec<(String, Value)> {
        self.state.lock().invocations.clone()
    }
}

#[async_trait]
impl InvocationProxy for FakeInvocationProxy {
    async fn wait_for_ready(&self, container_name: &str, _port: u16, _timeout_seconds: u64) -> bool {
        self.state.lock().ready.get(container_name).copied().unwrap_or(true)
    }

    async fn invoke(
        &self,
        container_name: &str,
        _port: u16,
        payload: Value,
    ) -> Result<Value, ProxyError> {
        let mut state = self.state.lock();
        state.invocations.push((container_name.to_string(), payload.clone()));
        match state.responses.get(container_name) {
            Some(response) => response.clone(),
            None => Ok(serde_json::json!({ "output": payload })),
        }
    }
}

#[cfg(test)]
#[path = "test_support_tests.rs"]
mod tests;
