use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreamView {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub created: DateTime<Utc>,
    /// e.g. "2023년 3월 5일 일요일 오후 3:05"
    pub created_label: String,
}
