use axum::{
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Json},
};
use chrono::Utc;
use okrcopilot_shared::{OkrDraft, OkrError, PublishedOkr, require_text};

use super::error::ApiError;
use super::{AppState, ApplyEditBody, ProcessBody, ResolveBaselineBody};

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Message for a publish payload that is not a draft.
pub(crate) const INVALID_OKR_MESSAGE: &str = "Invalid OKR data";
/// Message for any other body that fails to parse.
pub(crate) const INVALID_BODY_MESSAGE: &str = "invalid request body";

/// Unwrap a JSON body, turning a rejection into a short validation error.
/// The extractor's own text names serde fields and variants, so it only
/// goes to the log.
fn parse_body<T>(body: Result<Json<T>, JsonRejection>, message: &str) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(status = %rejection.status(), detail = %rejection.body_text(), "body rejected");
            Err(OkrError::validation(message).into())
        }
    }
}

/// GET /health
pub(super) async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /api/process-okr — run the pipeline over free text
pub(super) async fn handle_process(
    State(state): State<AppState>,
    body: Result<Json<ProcessBody>, JsonRejection>,
) -> ApiResult<OkrDraft> {
    let body = parse_body(body, INVALID_BODY_MESSAGE)?;
    require_text(&body.input, "input")?;

    if !state.processing_delay.is_zero() {
        tokio::time::sleep(state.processing_delay).await;
    }

    Ok(Json(state.pipeline.run(&body.input)?))
}

/// POST /api/resolve-baseline — answer one baseline question
pub(super) async fn handle_resolve_baseline(
    State(state): State<AppState>,
    body: Result<Json<ResolveBaselineBody>, JsonRejection>,
) -> ApiResult<OkrDraft> {
    let body = parse_body(body, INVALID_BODY_MESSAGE)?;
    let draft = state
        .pipeline
        .resolve_baseline(body.draft, body.index, &body.value)?;
    Ok(Json(draft))
}

/// POST /api/apply-edit — apply a free-text edit instruction
pub(super) async fn handle_apply_edit(
    State(state): State<AppState>,
    body: Result<Json<ApplyEditBody>, JsonRejection>,
) -> ApiResult<OkrDraft> {
    let body = parse_body(body, INVALID_BODY_MESSAGE)?;
    Ok(Json(state.pipeline.apply_edit(body.draft, &body.instruction)?))
}

/// POST /api/publish-okr — approve a draft into the store
pub(super) async fn handle_publish(
    State(state): State<AppState>,
    body: Result<Json<OkrDraft>, JsonRejection>,
) -> ApiResult<serde_json::Value> {
    let draft = parse_body(body, INVALID_OKR_MESSAGE)?;
    let okr = okrcopilot_core::approve(draft, state.store.as_ref(), Utc::now()).await?;
    Ok(Json(serde_json::json!({ "success": true, "okr": okr })))
}

/// GET /api/published-okrs — most recent first
pub(super) async fn handle_published(State(state): State<AppState>) -> ApiResult<Vec<PublishedOkr>> {
    Ok(Json(state.store.list().await?))
}
