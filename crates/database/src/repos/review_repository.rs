//! Repository for reviews users leave for each other.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::entities::{CreateReviewRequest, Review, ReviewLine};
use crate::types::DatabaseResult;

#[derive(Clone)]
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateReviewRequest) -> DatabaseResult<Review> {
        let result = sqlx::query(
            "INSERT INTO reviews (created_by_id, created_for_id, score, review, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(request.created_by_id)
        .bind(request.created_for_id)
        .bind(request.score)
        .bind(&request.review)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(review_id = id, created_for_id = request.created_for_id, "review created");

        let review = sqlx::query_as::<_, Review>(
            "SELECT id, created_by_id, created_for_id, score, review, created_at FROM reviews WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(review)
    }

    /// Reviews received by a user, newest first.
    pub async fn received_by(&self, user_id: i64) -> DatabaseResult<Vec<ReviewLine>> {
        let reviews = sqlx::query_as::<_, ReviewLine>(
            r#"
            SELECT r.id, r.score, r.review, r.created_at,
                   u.id AS created_by_id, u.name AS created_by_name, u.avatar AS created_by_avatar
            FROM reviews r
            JOIN users u ON u.id = r.created_by_id
            WHERE r.created_for_id = ?
            ORDER BY r.created_at DESC, r.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }
}
