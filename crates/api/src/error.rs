use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relay_core::error::CoreError;
use relay_core::scripting::invocation::InvocationError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for request validation and [`InvocationError`] for
/// script failures. Implements [`IntoResponse`] to produce a
/// `{ "error": message }` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A validation error from `relay_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The script could not produce a result.
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Core(CoreError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg),
            AppError::Core(core) => (StatusCode::BAD_REQUEST, core.to_string()),
            AppError::Invocation(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
