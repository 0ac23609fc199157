use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tracing::instrument;

use super::{dto::FeedbackResponse, services};
use crate::{
    error::{AppError, AppJson},
    state::AppState,
};

pub fn feedback_routes(body_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/api/feedback/", get(list_feedback).post(create_feedback))
        .route("/api/feedback", get(list_feedback).post(create_feedback))
        .layer(DefaultBodyLimit::max(body_limit))
}

/// GET /api/feedback/: latest 20, newest first.
#[instrument(skip(state))]
pub async fn list_feedback(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeedbackResponse>>, AppError> {
    let items = services::list_recent(state.feedback.as_ref()).await?;
    Ok(Json(items))
}

/// POST /api/feedback/ { name, email, rating, comments? }
#[instrument(skip(state, payload))]
pub async fn create_feedback(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> Result<(StatusCode, Json<FeedbackResponse>), AppError> {
    let created = services::submit(state.feedback.as_ref(), &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
