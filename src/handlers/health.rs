use std::any::Any;

use axum::response::{IntoResponse, Response};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

const SERVICE_NAME: &str = "lumina-api";

/// GET / - service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "API do sistema de gerenciamento escolar está funcionando!",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health - pings the database
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "service": SERVICE_NAME,
                "database": "ok",
                "timestamp": now,
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "service": SERVICE_NAME,
                    "error": e.to_string(),
                    "timestamp": now,
                })),
            )
        }
    }
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("Endpoint não encontrado")
}

/// Fallback for a known route hit with the wrong method
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("Método não permitido")
}

/// Response for a handler that panicked
pub fn internal_error(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "handler panicked");
    ApiError::internal_server_error("Erro interno do servidor").into_response()
}
