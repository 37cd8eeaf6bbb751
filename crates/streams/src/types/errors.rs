use neighborhood_common::FieldError;
use neighborhood_database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("스트림이 존재하지 않습니다.")]
    StreamNotFound,

    #[error("{0}")]
    InvalidField(#[from] FieldError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

pub type StreamResult<T> = Result<T, StreamError>;
