use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::feedback::repo_types::{Feedback, NewFeedback};

#[async_trait]
pub trait FeedbackRepo: Send + Sync {
    /// Persist a validated submission, returning it with its id and timestamp.
    async fn insert(&self, new: NewFeedback) -> anyhow::Result<Feedback>;

    /// At most `limit` records, newest first.
    async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<Feedback>>;
}

#[derive(Clone)]
pub struct PgFeedbackRepo {
    db: PgPool,
}

impl PgFeedbackRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeedbackRepo for PgFeedbackRepo {
    async fn insert(&self, new: NewFeedback) -> anyhow::Result<Feedback> {
        let row = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (name, email, rating, comments)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, rating, comments, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(new.rating)
        .bind(&new.comments)
        .fetch_one(&self.db)
        .await
        .context("insert feedback")?;
        Ok(row)
    }

    async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<Feedback>> {
        let rows = sqlx::query_as::<_, Feedback>(
            r#"
            SELECT id, name, email, rating, comments, created_at
            FROM feedback
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("list recent feedback")?;
        Ok(rows)
    }
}

#[cfg(test)]
pub use memory::InMemoryFeedbackRepo;

#[cfg(test)]
mod memory {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use time::OffsetDateTime;

    use super::FeedbackRepo;
    use crate::feedback::repo_types::{Feedback, NewFeedback};

    /// Stands in for Postgres in tests: sequential ids, non-decreasing timestamps.
    #[derive(Default)]
    pub struct InMemoryFeedbackRepo {
        rows: Mutex<Vec<Feedback>>,
    }

    #[async_trait]
    impl FeedbackRepo for InMemoryFeedbackRepo {
        async fn insert(&self, new: NewFeedback) -> anyhow::Result<Feedback> {
            let mut rows = self
                .rows
                .lock()
                .map_err(|_| anyhow::anyhow!("feedback store poisoned"))?;
            let now = OffsetDateTime::now_utc();
            let created_at = match rows.last() {
                Some(last) if last.created_at > now => last.created_at,
                _ => now,
            };
            let row = Feedback {
                id: rows.len() as i64 + 1,
                name: new.name,
                email: new.email,
                rating: new.rating,
                comments: new.comments,
                created_at,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<Feedback>> {
            let rows = self
                .rows
                .lock()
                .map_err(|_| anyhow::anyhow!("feedback store poisoned"))?;
            let mut out: Vec<Feedback> = rows.clone();
            out.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
            out.truncate(limit.max(0) as usize);
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: i32) -> NewFeedback {
        NewFeedback {
            name: format!("user{n}"),
            email: format!("user{n}@example.com"),
            rating: (n % 5) + 1,
            comments: String::new(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let repo = InMemoryFeedbackRepo::default();
        let a = repo.insert(sample(1)).await.expect("insert");
        let b = repo.insert(sample(2)).await.expect("insert");
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(b.created_at >= a.created_at);
    }

    #[tokio::test]
    async fn list_recent_is_newest_first_and_limited() {
        let repo = InMemoryFeedbackRepo::default();
        for n in 1..=5 {
            repo.insert(sample(n)).await.expect("insert");
        }
        let rows = repo.list_recent(3).await.expect("list");
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
    }

    #[tokio::test]
    async fn list_recent_on_empty_store() {
        let repo = InMemoryFeedbackRepo::default();
        assert!(repo.list_recent(20).await.expect("list").is_empty());
    }
}
