use sqlx::FromRow;
use time::OffsetDateTime;

/// Feedback row in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Feedback {
    pub id: i64,                    // BIGSERIAL, assigned on insert
    pub name: String,
    pub email: String,
    pub rating: i32,                // 1..=5
    pub comments: String,           // "" when the client sent none
    pub created_at: OffsetDateTime, // DEFAULT now()
}

/// A validated submission that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub rating: i32,
    pub comments: String,
}
