//! Views returned by the community endpoints.

use chrono::{DateTime, Utc};
use neighborhood_database::Post;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PostAuthor {
    pub id: i64,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub created_ago: String,
    pub user: PostAuthor,
    pub answers: Vec<AnswerView>,
    #[serde(rename = "_count")]
    pub count: PostCount,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerView {
    pub id: i64,
    pub answer: String,
    pub updated: DateTime<Utc>,
    pub updated_ago: String,
    pub user: PostAuthor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PostCount {
    pub answers: i64,
    pub recommendations: i64,
}

/// A post as seen by one reader.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailView {
    pub post: PostView,
    pub is_recommend: bool,
}

/// The stored columns of a post, returned after writes.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            title: post.title,
            content: post.content,
            created: post.created_at,
            updated: post.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationView {
    pub is_recommend: bool,
    pub recommendations: i64,
}
