//! HTTP transport for microsvc. Requires the `http` feature.
//!
//! ## Routes
//!
//! - `POST /:command`: dispatch a command. Body = JSON input.
//! - `GET /health`: `{ "ok": true, "commands": [...] }`.
//!
//! Handlers are synchronous and may wait on a key lock, so each dispatch runs
//! on tokio's blocking pool.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::error;

use super::service::{CommandRequest, Service};

/// Build an axum `Router` that dispatches commands via `service`.
pub fn router<R: Send + Sync + 'static>(service: Arc<Service<R>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/:command", post(command_handler))
        .with_state(service)
}

/// Serve `service` over HTTP at `addr` (e.g. `"0.0.0.0:5000"`).
pub async fn serve<R: Send + Sync + 'static>(
    service: Arc<Service<R>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
) -> impl IntoResponse {
    Json(json!({ "ok": true, "commands": service.commands() }))
}

async fn command_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
    Path(command): Path<String>,
    Json(input): Json<Value>,
) -> Response {
    let request = CommandRequest { command, input };
    let dispatched =
        tokio::task::spawn_blocking(move || service.dispatch_request(&request)).await;

    match dispatched {
        Ok(response) => {
            let status =
                StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(response.body)).into_response()
        }
        Err(join_error) => {
            error!(error = %join_error, "command task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "command task failed" })),
            )
                .into_response()
        }
    }
}
