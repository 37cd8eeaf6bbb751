//! Views returned by the chat endpoints.

use chrono::{DateTime, Utc};
use neighborhood_common::Timestamped;
use neighborhood_database::ChatLine;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoomView {
    pub id: i64,
    pub product_id: Option<i64>,
    pub seller_id: i64,
    pub buyer_id: i64,
    pub created: DateTime<Utc>,
    pub chats: Vec<ChatView>,
    pub sections: Vec<ChatSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChatSender {
    pub id: i64,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChatView {
    pub id: i64,
    pub chat: String,
    pub created: DateTime<Utc>,
    pub user: ChatSender,
}

impl From<ChatLine> for ChatView {
    fn from(line: ChatLine) -> Self {
        Self {
            id: line.id,
            chat: line.chat,
            created: line.created_at,
            user: ChatSender {
                id: line.user_id,
                avatar: line.user_avatar,
            },
        }
    }
}

impl Timestamped for ChatView {
    fn timestamp(&self) -> DateTime<Utc> {
        self.created
    }
}

/// A message inside a day section, with its clock label.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChatMessageView {
    pub id: i64,
    pub chat: String,
    pub created: DateTime<Utc>,
    /// e.g. "오후 3:05"
    pub time: String,
    pub user: ChatSender,
}

/// Messages sent on the same day, labelled "2023년 3월 5일".
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChatSection {
    pub date: String,
    pub chats: Vec<ChatMessageView>,
}
