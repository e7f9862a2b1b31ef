use anyhow::Context;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

use crate::api::{
    AppError, InsightsResponse, QualityRequest, QualityResponse, RecordQuery, ScoreResponse,
    TimingQuery, TimingResponse,
};
use post_score::config::{RouteSet, ScoringConfig};
use post_score::error::HistoryError;
use post_score::history::{HistoryEntry, ScoreHistory};
use post_score::scoring::{calculate_content_quality_score, PostingWindow};
use post_score::{evaluate_checked, PostInsights, PostMetrics, ScoreResult};

#[derive(Clone)]
pub struct AppState {
    config: Arc<ScoringConfig>,
    history: Option<Arc<ScoreHistory>>,
}

impl AppState {
    pub fn new(config: ScoringConfig, history: Option<ScoreHistory>) -> Self {
        Self {
            config: Arc::new(config),
            history: history.map(Arc::new),
        }
    }
}

pub async fn serve(args: crate::ServeArgs, config: ScoringConfig) -> anyhow::Result<()> {
    let routes = config.routes.clone();
    let history = if routes.history {
        Some(
            ScoreHistory::load(config.history.path.clone(), config.history.capacity)
                .await
                .context("failed to load score history")?,
        )
    } else {
        None
    };

    let app = build_router(AppState::new(config, history), &routes);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind server")?;
    tracing::info!(%addr, ?routes, "serving post scoring API");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Health and scoring are always mounted; the rest follows `routes`.
pub fn build_router(state: AppState, routes: &RouteSet) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(health))
        .route("/api/score", post(score_handler));

    if routes.quality {
        router = router.route("/api/quality", post(quality_handler));
    }
    if routes.timing {
        router = router.route("/api/timing", get(timing_handler));
    }
    if routes.insights {
        router = router.route("/api/insights", post(insights_handler));
    }
    if routes.history && state.history.is_some() {
        router = router
            .route("/api/history", get(list_history))
            .route("/api/history/:id", get(get_history).delete(delete_history));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn score_handler(
    State(state): State<AppState>,
    query: Result<Query<RecordQuery>, QueryRejection>,
    body: Result<Json<PostMetrics>, JsonRejection>,
) -> Result<Json<ScoreResponse>, AppError> {
    let Query(query) = query?;
    let Json(metrics) = body?;
    let result = evaluate_checked(&metrics, &state.config)?;
    tracing::debug!(score = result.score, level = %result.level.name, "scored post");
    let entry = maybe_record(&state, &query, &metrics, &result).await?;
    Ok(Json(ScoreResponse::new(result, entry)))
}

async fn quality_handler(
    body: Result<Json<QualityRequest>, JsonRejection>,
) -> Result<Json<QualityResponse>, AppError> {
    let Json(request) = body?;
    Ok(Json(QualityResponse {
        content_quality_score: calculate_content_quality_score(
            request.caption_length,
            request.hashtag_count,
            request.media_type,
            request.has_call_to_action,
        ),
    }))
}

async fn timing_handler(
    State(state): State<AppState>,
    query: Result<Query<TimingQuery>, QueryRejection>,
) -> Result<Json<TimingResponse>, AppError> {
    let Query(query) = query?;
    let hour = state.config.timing.hour_of(&query.timestamp)?;
    let window = state.config.timing.window(hour);
    Ok(Json(TimingResponse {
        timestamp: query.timestamp,
        hour,
        window,
        optimal: window != PostingWindow::Off,
    }))
}

async fn insights_handler(
    State(state): State<AppState>,
    query: Result<Query<RecordQuery>, QueryRejection>,
    body: Result<Json<PostInsights>, JsonRejection>,
) -> Result<Json<InsightsResponse>, AppError> {
    let Query(query) = query?;
    let Json(insights) = body?;
    let metrics = insights.to_metrics(&state.config)?;
    let result = evaluate_checked(&metrics, &state.config)?;
    let entry = maybe_record(&state, &query, &metrics, &result).await?;
    Ok(Json(InsightsResponse {
        metrics,
        result,
        history_id: entry.map(|entry| entry.id),
    }))
}

async fn list_history(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    match &state.history {
        Some(history) => Json(history.list().await),
        None => Json(Vec::new()),
    }
}

async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HistoryEntry>, AppError> {
    let history = state
        .history
        .as_ref()
        .ok_or_else(|| HistoryError::NotFound(id.clone()))?;
    let entry = history
        .get(&id)
        .await
        .ok_or(HistoryError::NotFound(id))?;
    Ok(Json(entry))
}

async fn delete_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let history = state
        .history
        .as_ref()
        .ok_or_else(|| HistoryError::NotFound(id.clone()))?;
    history.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn maybe_record(
    state: &AppState,
    query: &RecordQuery,
    metrics: &PostMetrics,
    result: &ScoreResult,
) -> Result<Option<HistoryEntry>, AppError> {
    if !query.record.unwrap_or(false) {
        return Ok(None);
    }
    match &state.history {
        Some(history) => Ok(Some(history.record(metrics.clone(), result.clone()).await?)),
        None => Ok(None),
    }
}
