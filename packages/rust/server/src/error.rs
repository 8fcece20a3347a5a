use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use okrcopilot_shared::OkrError;

/// Generic body for 5xx responses. Details stay in the logs.
pub(crate) const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Handler error: an [`OkrError`] rendered as `{"error": "..."}`.
#[derive(Debug)]
pub(crate) struct ApiError(pub OkrError);

impl From<OkrError> for ApiError {
    fn from(err: OkrError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub(crate) fn status(&self) -> StatusCode {
        match self.0 {
            OkrError::Validation { .. } => StatusCode::BAD_REQUEST,
            OkrError::StaleGap { .. } => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            OkrError::Validation { message } => {
                tracing::warn!(%message, "rejected request");
                message.clone()
            }
            err @ OkrError::StaleGap { .. } => {
                tracing::warn!(error = %err, "stale baseline submission");
                err.to_string()
            }
            err => {
                tracing::error!(error = %err, "request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
