//! Community post entity definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct PostOwner {
    pub id: i64,
    pub user_id: i64,
}

/// A post joined with its author and aggregate counts.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PostDetail {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: i64,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub answer_count: i64,
    pub recommendation_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Answer {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An answer joined with its author.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AnswerLine {
    pub id: i64,
    pub answer: String,
    pub updated_at: DateTime<Utc>,
    pub user_id: i64,
    pub user_name: String,
    pub user_avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}
