use serde_json::Value;
use tracing::{debug, info};

use crate::error::AppError;
use crate::feedback::{
    dto::FeedbackResponse,
    repo::FeedbackRepo,
    validation::validate,
};

/// How many records the list endpoint returns.
pub const RECENT_LIMIT: i64 = 20;

pub async fn list_recent(repo: &dyn FeedbackRepo) -> Result<Vec<FeedbackResponse>, AppError> {
    let rows = repo.list_recent(RECENT_LIMIT).await?;
    debug!(count = rows.len(), "listed recent feedback");
    Ok(rows.into_iter().map(FeedbackResponse::from).collect())
}

/// Validates the payload and, only if it is valid, inserts it.
pub async fn submit(repo: &dyn FeedbackRepo, payload: &Value) -> Result<FeedbackResponse, AppError> {
    let new = validate(payload).map_err(AppError::Validation)?;
    let row = repo.insert(new).await?;
    info!(feedback_id = row.id, rating = row.rating, "feedback stored");
    Ok(row.into())
}
