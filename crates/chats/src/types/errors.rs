//! Error types for chat operations.

use neighborhood_common::FieldError;
use neighborhood_database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Also returned to users who do not take part in the room.
    #[error("채팅방이 존재하지 않습니다.")]
    RoomNotFound,

    #[error("{0}")]
    InvalidField(#[from] FieldError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

pub type ChatResult<T> = Result<T, ChatError>;
