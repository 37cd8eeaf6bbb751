//! Repository for chat rooms and their messages.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::entities::{Chat, ChatLine, ChatRoom};
use crate::types::{DatabaseError, DatabaseResult};

#[derive(Clone)]
pub struct ChatRepository {
    pool: SqlitePool,
}

impl ChatRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_room(
        &self,
        product_id: Option<i64>,
        seller_id: i64,
        buyer_id: i64,
    ) -> DatabaseResult<ChatRoom> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO chat_rooms (product_id, seller_id, buyer_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(product_id)
        .bind(seller_id)
        .bind(buyer_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(chat_room_id = id, seller_id, buyer_id, "chat room created");

        self.find_room(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("chat room {id}")))
    }

    pub async fn find_room(&self, id: i64) -> DatabaseResult<Option<ChatRoom>> {
        let room = sqlx::query_as::<_, ChatRoom>(
            "SELECT id, product_id, seller_id, buyer_id, created_at, updated_at FROM chat_rooms WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(room)
    }

    /// Messages of a room in the order they were sent.
    pub async fn chats_in_room(&self, chat_room_id: i64) -> DatabaseResult<Vec<ChatLine>> {
        let chats = sqlx::query_as::<_, ChatLine>(
            r#"
            SELECT c.id, c.chat, c.created_at, u.id AS user_id, u.avatar AS user_avatar
            FROM chats c
            JOIN users u ON u.id = c.user_id
            WHERE c.chat_room_id = ?
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(chat_room_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(chats)
    }

    pub async fn find_line(&self, chat_id: i64) -> DatabaseResult<Option<ChatLine>> {
        let line = sqlx::query_as::<_, ChatLine>(
            r#"
            SELECT c.id, c.chat, c.created_at, u.id AS user_id, u.avatar AS user_avatar
            FROM chats c
            JOIN users u ON u.id = c.user_id
            WHERE c.id = ?
            "#,
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(line)
    }

    pub async fn create_chat(&self, chat_room_id: i64, user_id: i64, chat: &str) -> DatabaseResult<Chat> {
        self.create_chat_at(chat_room_id, user_id, chat, Utc::now()).await
    }

    /// Stores a message with an explicit send time and bumps the room.
    pub async fn create_chat_at(
        &self,
        chat_room_id: i64,
        user_id: i64,
        chat: &str,
        sent_at: DateTime<Utc>,
    ) -> DatabaseResult<Chat> {
        let sent_at = sent_at.to_rfc3339();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO chats (chat_room_id, user_id, chat, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(chat_room_id)
        .bind(user_id)
        .bind(chat)
        .bind(&sent_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE chat_rooms SET updated_at = ? WHERE id = ?")
            .bind(&sent_at)
            .bind(chat_room_id)
            .execute(&mut *tx)
            .await?;

        let chat = sqlx::query_as::<_, Chat>(
            "SELECT id, chat_room_id, user_id, chat, created_at FROM chats WHERE id = ?",
        )
        .bind(result.last_insert_rowid())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(chat)
    }
}
