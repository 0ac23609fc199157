use serde::Serialize;
use time::OffsetDateTime;

use crate::feedback::repo_types::Feedback;

/// Wire form of a feedback record.
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub rating: i32,
    pub comments: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Feedback> for FeedbackResponse {
    fn from(f: Feedback) -> Self {
        Self {
            id: f.id,
            name: f.name,
            email: f.email,
            rating: f.rating,
            comments: f.comments,
            created_at: f.created_at,
        }
    }
}
