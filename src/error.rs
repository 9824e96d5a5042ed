// HTTP API Error Types
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::{DatabaseError, RecordError};

/// HTTP API error. Serialized as `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 405 Method Not Allowed
    MethodNotAllowed(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::MethodNotAllowed(msg)
            | ApiError::InternalServerError(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        ApiError::MethodNotAllowed(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    /// A payload problem on a write. Missing fields keep their own wording;
    /// anything else is prefixed with the operation's failure message.
    pub fn rejected(context: &str, err: RecordError) -> Self {
        match err {
            RecordError::MissingRequiredFields(_) | RecordError::NotAnObject => {
                ApiError::bad_request(err.to_string())
            }
            other => ApiError::bad_request(format!("{}: {}", context, other)),
        }
    }

    /// Writes report storage failures as client errors.
    pub fn write_failed(context: &str, err: &DatabaseError) -> Self {
        ApiError::bad_request(format!("{}: {}", context, err))
    }

    pub fn read_failed(context: &str, err: &DatabaseError) -> Self {
        ApiError::internal_server_error(format!("{}: {}", context, err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(format!("JSON inválido: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(format!("Identificador inválido: {}", rejection.body_text()))
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn assert_error(error: ApiError, expected_status: StatusCode, expected_message: &str) {
        let resp = error.into_response();
        assert_eq!(resp.status(), expected_status);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, json!({ "error": expected_message }));
    }

    #[tokio::test]
    async fn should_return_not_found() {
        assert_error(
            ApiError::not_found("Aluno não encontrado."),
            StatusCode::NOT_FOUND,
            "Aluno não encontrado.",
        )
        .await;
    }

    #[tokio::test]
    async fn should_prefix_invalid_fields_with_context() {
        let err = RecordError::InvalidField { field: "presente", expected: "booleano" };
        assert_error(
            ApiError::rejected("Erro ao registrar presença", err),
            StatusCode::BAD_REQUEST,
            "Erro ao registrar presença: campo 'presente' inválido: esperado booleano",
        )
        .await;
    }

    #[tokio::test]
    async fn should_keep_missing_fields_wording() {
        let err = RecordError::MissingRequiredFields(vec!["email"]);
        assert_error(
            ApiError::rejected("Erro ao criar professor", err),
            StatusCode::BAD_REQUEST,
            "Campos obrigatórios ausentes: email",
        )
        .await;
    }

    #[tokio::test]
    async fn should_map_read_and_write_failures() {
        let err = DatabaseError::Unavailable("connection refused".to_string());
        assert_error(
            ApiError::read_failed("Erro ao listar turmas", &err),
            StatusCode::INTERNAL_SERVER_ERROR,
            "Erro ao listar turmas: Database unavailable: connection refused",
        )
        .await;
        assert_error(
            ApiError::write_failed("Erro ao criar turma", &err),
            StatusCode::BAD_REQUEST,
            "Erro ao criar turma: Database unavailable: connection refused",
        )
        .await;
    }
}
