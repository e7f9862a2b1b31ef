use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use post_score::error::{HistoryError, MetricsError};
use post_score::history::HistoryEntry;
use post_score::scoring::PostingWindow;
use post_score::{MediaType, PostMetrics, ScoreResult};

#[derive(Debug, Deserialize)]
pub struct RecordQuery {
    pub record: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityRequest {
    #[serde(default)]
    pub caption_length: u32,
    #[serde(default)]
    pub hashtag_count: u32,
    pub media_type: MediaType,
    #[serde(default)]
    pub has_call_to_action: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityResponse {
    pub content_quality_score: u8,
}

#[derive(Debug, Deserialize)]
pub struct TimingQuery {
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct TimingResponse {
    pub timestamp: String,
    pub hour: u32,
    pub window: PostingWindow,
    pub optimal: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub result: ScoreResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_id: Option<String>,
}

impl ScoreResponse {
    pub fn new(result: ScoreResult, entry: Option<HistoryEntry>) -> Self {
        Self {
            result,
            history_id: entry.map(|entry| entry.id),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub metrics: PostMetrics,
    pub result: ScoreResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Invalid(#[from] MetricsError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("{0}")]
    Malformed(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Malformed(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Invalid(err) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string()),
            AppError::Malformed(message) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
            }
            AppError::History(HistoryError::Invalid(err)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
            }
            AppError::History(HistoryError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("history entry {id} not found"),
            ),
            AppError::History(err) => {
                tracing::error!(error = %err, "history store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });
        (status, axum::Json(body)).into_response()
    }
}
