//! Handlers for the generation endpoints.
//!
//! Every endpoint follows the same template: pull one required string
//! field out of the JSON body, run the script operation with it, and relay
//! the script's JSON verbatim. Script failures become a 500 with the
//! failure message.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use relay_core::error::CoreError;
use relay_core::operation::Operation;
use relay_core::scripting::invocation::InvocationRequest;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body field read by `POST /api/keywords`.
pub const FIELD_SEED_KEYWORD: &str = "seedKeyword";
/// Request body field read by `POST /api/titles`.
pub const FIELD_KEYWORD: &str = "keyword";
/// Request body field read by `POST /api/topics`.
pub const FIELD_TITLE: &str = "title";
/// Request body field read by `POST /api/content`.
pub const FIELD_TOPIC: &str = "topic";

/// POST /api/keywords
///
/// Body: `{ "seedKeyword": "..." }`. Runs `generate_keywords`.
pub async fn generate_keywords(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Value>> {
    relay(&state, Operation::GenerateKeywords, FIELD_SEED_KEYWORD, body).await
}

/// POST /api/titles
///
/// Body: `{ "keyword": "..." }`. Runs `generate_titles`.
pub async fn generate_titles(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Value>> {
    relay(&state, Operation::GenerateTitles, FIELD_KEYWORD, body).await
}

/// POST /api/topics
///
/// Body: `{ "title": "..." }`. Runs `generate_topics`.
pub async fn generate_topics(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Value>> {
    relay(&state, Operation::GenerateTopics, FIELD_TITLE, body).await
}

/// POST /api/content
///
/// Body: `{ "topic": "..." }`. Runs `generate_content`.
pub async fn generate_content(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Value>> {
    relay(&state, Operation::GenerateContent, FIELD_TOPIC, body).await
}

async fn relay(
    state: &AppState,
    operation: Operation,
    field: &'static str,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let argument = required_string(&body, field)?;
    let request = InvocationRequest::new(operation, argument)?;

    let result = state.invoker.invoke(&request).await.inspect_err(|e| {
        tracing::error!(%operation, error = %e, "Generation request failed");
    })?;

    Ok(Json(result))
}

/// Extract a required, non-empty string field from a JSON body.
///
/// Absent, `null`, and `""` are all "missing". Any other non-string value
/// is rejected rather than stringified.
fn required_string(body: &Value, field: &'static str) -> Result<String, CoreError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(CoreError::MissingField { field }),
        Some(Value::String(s)) if s.is_empty() => Err(CoreError::MissingField { field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(CoreError::Validation(format!("{field} must be a string"))),
    }
}
