//! Error types for community board operations.

use neighborhood_common::FieldError;
use neighborhood_database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("포스트가 존재하지 않습니다.")]
    PostNotFound,

    /// The post is missing or written by someone else.
    #[error("포스트를 수정할 수 없습니다.")]
    CannotEdit,

    /// The post is missing or written by someone else.
    #[error("포스트를 삭제할 수 없습니다.")]
    CannotDelete,

    #[error("{0}")]
    InvalidField(#[from] FieldError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

pub type PostResult<T> = Result<T, PostError>;
