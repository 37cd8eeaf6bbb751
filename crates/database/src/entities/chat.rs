//! Chat room entity definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ChatRoom {
    pub id: i64,
    pub product_id: Option<i64>,
    pub seller_id: i64,
    pub buyer_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatRoom {
    pub fn has_participant(&self, user_id: i64) -> bool {
        self.seller_id == user_id || self.buyer_id == user_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Chat {
    pub id: i64,
    pub chat_room_id: i64,
    pub user_id: i64,
    pub chat: String,
    pub created_at: DateTime<Utc>,
}

/// A chat message joined with its sender's avatar.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ChatLine {
    pub id: i64,
    pub chat: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
    pub user_avatar: Option<String>,
}
