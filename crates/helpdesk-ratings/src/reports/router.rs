use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::ScoreRecord;
use super::repository::RatingsRepository;
use super::service::{RatingsService, ServiceError};

/// Request body shared by both score endpoints. Bounds are optional here so
/// the service can perform the required-argument check itself.
#[derive(Debug, Deserialize)]
pub struct ScoreRangeRequest {
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_date: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub struct OverallScoreResponse {
    pub overall_score: f64,
}

#[derive(Debug, Serialize)]
pub struct AggregatedScoresResponse {
    pub scores: Vec<ScoreRecord>,
}

/// Router builder exposing the score endpoints.
pub fn score_router<R>(service: Arc<RatingsService<R>>) -> Router
where
    R: RatingsRepository + 'static,
{
    Router::new()
        .route("/api/v1/scores/overall", post(overall_score_handler::<R>))
        .route(
            "/api/v1/scores/aggregated",
            post(aggregated_scores_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn overall_score_handler<R>(
    State(service): State<Arc<RatingsService<R>>>,
    axum::Json(request): axum::Json<ScoreRangeRequest>,
) -> Response
where
    R: RatingsRepository + 'static,
{
    match service.get_overall_score(request.start_date, request.end_date) {
        Ok(overall_score) => (
            StatusCode::OK,
            axum::Json(OverallScoreResponse { overall_score }),
        )
            .into_response(),
        Err(error) => score_error_response(error, "failed to retrieve overall score"),
    }
}

pub(crate) async fn aggregated_scores_handler<R>(
    State(service): State<Arc<RatingsService<R>>>,
    axum::Json(request): axum::Json<ScoreRangeRequest>,
) -> Response
where
    R: RatingsRepository + 'static,
{
    match service.get_aggregated_scores(request.start_date, request.end_date) {
        Ok(scores) => (
            StatusCode::OK,
            axum::Json(AggregatedScoresResponse { scores }),
        )
            .into_response(),
        Err(error) => score_error_response(error, "failed to retrieve aggregated scores"),
    }
}

/// Invalid arguments surface verbatim; everything internal (bad data,
/// unreachable store) is logged with detail and answered generically.
fn score_error_response(error: ServiceError, context: &str) -> Response {
    match error {
        ServiceError::InvalidDateRange => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        other => {
            error!(error = %other, "{}", context);
            let payload = json!({ "error": context });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
