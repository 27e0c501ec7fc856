// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The supplemental HTTP surface: `POST /deploy`, `POST /invoke/:agent_id`,
//! `POST /stop/:agent_id`, `GET /agents`, `GET /health` (spec §5.6, §6).

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use oken_core::RunnerError;
use serde::Serialize;
use serde_json::Value;

use crate::context::AppContext;

pub fn router(context: AppContext) -> Router {
    Router::new()
        .route("/deploy", post(deploy))
        .route("/invoke/:agent_id", post(invoke))
        .route("/stop/:agent_id", post(stop))
        .route("/agents", get(list_agents))
        .route("/health", get(health))
        .with_state(context)
}

/// Wraps a [`RunnerError`] so this crate, not `oken-core`, owns the
/// `IntoResponse` impl (the orphan rule forbids implementing a foreign
/// trait for a foreign type directly).
struct ApiError(RunnerError);

impl From<RunnerError> for ApiError {
    fn from(err: RunnerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(serde_json::json!({ "error": self.0.to_string(), "code": self.0.code() }));
        (status, body).into_response()
    }
}

#[derive(Serialize)]
struct DeployResponse {
    agent_id: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    invoke_endpoint: Option<String>,
}

async fn deploy(State(ctx): State<AppContext>, mut multipart: Multipart) -> Result<Response, ApiError> {
    let mut agent_id = None;
    let mut tarball = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| RunnerError::config(e.to_string()))? {
        match field.name() {
            Some("agent_id") => {
                agent_id = Some(field.text().await.map_err(|e| RunnerError::config(e.to_string()))?);
            }
            Some("tarball") => {
                tarball = Some(field.bytes().await.map_err(|e| RunnerError::config(e.to_string()))?);
            }
            _ => {}
        }
    }

    let agent_id = agent_id.ok_or_else(|| RunnerError::config("missing agent_id field"))?;
    let tarball = tarball.ok_or_else(|| RunnerError::config("missing tarball field"))?;

    let outcome = ctx.deploy(&agent_id, &tarball).await?;
    let body = DeployResponse {
        agent_id: outcome.agent_id.to_string(),
        status: outcome.status.as_str().to_string(),
        invoke_endpoint: outcome.invoke_endpoint,
    };
    Ok((StatusCode::OK, Json(body)).into_response())
}

async fn invoke(
    State(ctx): State<AppContext>,
    Path(agent_id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let result = ctx.invoke(&agent_id, payload).await?;
    Ok(Json(result))
}

async fn stop(State(ctx): State<AppContext>, Path(agent_id): Path<String>) -> Result<StatusCode, ApiError> {
    ctx.stop(&agent_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
struct AgentSummary {
    agent_id: String,
    status: String,
}

async fn list_agents(State(ctx): State<AppContext>) -> Json<Vec<AgentSummary>> {
    let agents = ctx
        .registry
        .list()
        .into_iter()
        .map(|state| AgentSummary { agent_id: state.agent_id.to_string(), status: state.status.as_str().to_string() })
        .collect();
    Json(agents)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    agents_running: usize,
}

async fn health(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", agents_running: ctx.registry.count_running() })
}

#[cfg(test)]
#[path = "surface_tests.rs"]
mod tests;
