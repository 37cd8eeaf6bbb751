//! Repository for live streams.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::entities::{CreateStreamRequest, Stream};
use crate::types::{DatabaseError, DatabaseResult};

const STREAM_COLUMNS: &str = "id, user_id, name, price, description, created_at, updated_at";

#[derive(Clone)]
pub struct StreamRepository {
    pool: SqlitePool,
}

impl StreamRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: i64, request: &CreateStreamRequest) -> DatabaseResult<Stream> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO streams (user_id, name, price, description, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&request.name)
        .bind(request.price)
        .bind(&request.description)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(stream_id = id, user_id, "stream created");

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("stream {id}")))
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Stream>> {
        let stream =
            sqlx::query_as::<_, Stream>(&format!("SELECT {STREAM_COLUMNS} FROM streams WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(stream)
    }

    /// One page of streams, newest first. Pages start at 1.
    pub async fn list_page(&self, page: u32, per_page: u32) -> DatabaseResult<Vec<Stream>> {
        let offset = i64::from(page.max(1) - 1) * i64::from(per_page);

        let streams = sqlx::query_as::<_, Stream>(&format!(
            "SELECT {STREAM_COLUMNS} FROM streams ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(i64::from(per_page))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(streams)
    }
}
