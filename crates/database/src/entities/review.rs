//! Review entity definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub created_by_id: i64,
    pub created_for_id: i64,
    pub score: i64,
    pub review: String,
    pub created_at: DateTime<Utc>,
}

/// A review joined with its author.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ReviewLine {
    pub id: i64,
    pub score: i64,
    pub review: String,
    pub created_at: DateTime<Utc>,
    pub created_by_id: i64,
    pub created_by_name: String,
    pub created_by_avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewRequest {
    pub created_by_id: i64,
    pub created_for_id: i64,
    pub score: i64,
    pub review: String,
}
