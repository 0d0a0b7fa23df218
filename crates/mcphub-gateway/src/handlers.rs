//! HTTP handlers for the gateway

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use mcphub_core::{HubError, OperationOutcome, ServerDescriptor, StatusReport};

use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health() -> Json<HealthResponse> {
    debug!("[Gateway] Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn status(State(state): State<AppState>) -> Json<StatusReport> {
    Json(state.manager.status())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub server_name: String,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
}

/// Descriptor resolution order: inline command in the request body, then the
/// configured entry under this name, then the name itself as a script path
/// (the supervisor infers the interpreter from its extension).
fn resolve_descriptor(state: &AppState, req: &RegisterRequest) -> ServerDescriptor {
    if let Some(command) = &req.command {
        return ServerDescriptor {
            identifier: req.server_name.clone(),
            command: Some(command.clone()),
            args: req.args.clone(),
            env: req.env.clone(),
        };
    }
    if let Some(descriptor) = state.config.get(&req.server_name) {
        return descriptor;
    }
    ServerDescriptor::script(req.server_name.clone()).with_env(req.env.clone())
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let descriptor = resolve_descriptor(&state, &req);
    match state.manager.register_server(&descriptor).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectRequest {
    pub server_name: String,
}

pub async fn disconnect(
    State(state): State<AppState>,
    Json(req): Json<DisconnectRequest>,
) -> Response {
    match state.manager.disconnect_server(&req.server_name).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolRequest {
    pub server_name: String,
    pub tool_name: String,
    #[serde(default)]
    pub args: Option<Value>,
}

pub async fn call_tool(
    State(state): State<AppState>,
    Json(req): Json<CallToolRequest>,
) -> Response {
    match state
        .manager
        .invoke_tool(&req.server_name, &req.tool_name, req.args)
        .await
    {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list_tools(
    State(state): State<AppState>,
    Path(server_name): Path<String>,
) -> Response {
    match state.manager.list_tools(&server_name).await {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list_resources(
    State(state): State<AppState>,
    Path(server_name): Path<String>,
) -> Response {
    match state.manager.list_resources(&server_name).await {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadResourceRequest {
    pub server_name: String,
    pub uri: String,
}

pub async fn read_resource(
    State(state): State<AppState>,
    Json(req): Json<ReadResourceRequest>,
) -> Response {
    match state
        .manager
        .read_resource(&req.server_name, &req.uri)
        .await
    {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => error_response(e),
    }
}

fn status_code(err: &HubError) -> StatusCode {
    if err.is_caller_error() {
        StatusCode::BAD_REQUEST
    } else {
        match err {
            HubError::ConnectionFailed { .. } | HubError::Transport { .. } => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn error_response(err: HubError) -> Response {
    let code = status_code(&err);
    (code, Json(OperationOutcome::error(err.to_string()))).into_response()
}
