//! REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tokio::sync::mpsc;

use super::types::{ErrorResponse, TerminalRequest, TerminalResponse};
use crate::gate::{ServerInfo, ShellGate};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<ShellGate>,
}

impl AppState {
    pub fn new(gate: ShellGate) -> Self {
        Self {
            gate: Arc::new(gate),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ShellGate::default())
    }
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Server descriptor endpoint.
pub async fn server_info(State(state): State<AppState>) -> Json<ServerInfo> {
    Json(state.gate.info())
}

/// Run a command through the gate.
pub async fn terminal(
    State(state): State<AppState>,
    payload: Result<Json<TerminalRequest>, JsonRejection>,
) -> Result<Json<TerminalResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(req) = payload.map_err(|rejection| {
        (
            rejection.status(),
            Json(ErrorResponse::bad_request(rejection.body_text())),
        )
    })?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let output = state.gate.terminal(&req.command, &tx).await;
    drop(tx);

    let mut notifications = Vec::new();
    while let Some(line) = rx.recv().await {
        notifications.push(line);
    }

    Ok(Json(TerminalResponse {
        output,
        notifications,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(health().await, "OK");
    }

    #[tokio::test]
    async fn test_server_info_endpoint() {
        let Json(info) = server_info(State(AppState::default())).await;
        assert_eq!(info.name, "shell-gate");
        assert_eq!(info.timeout, 30);
    }

    #[tokio::test]
    async fn test_terminal_rejects_without_notification() {
        let Json(resp) = terminal(
            State(AppState::default()),
            Ok(Json(TerminalRequest {
                command: "rm -rf /".into(),
            })),
        )
        .await
        .unwrap();
        assert!(resp.output.starts_with("Command 'rm' is not allowed."));
        assert!(resp.notifications.is_empty());
    }

    #[tokio::test]
    async fn test_terminal_runs_echo() {
        let Json(resp) = terminal(
            State(AppState::default()),
            Ok(Json(TerminalRequest {
                command: "echo handler".into(),
            })),
        )
        .await
        .unwrap();
        assert_eq!(resp.output.trim_end(), "handler");
        assert_eq!(resp.notifications, vec!["Running command: echo handler"]);
    }
}
