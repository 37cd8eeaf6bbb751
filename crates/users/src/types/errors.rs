//! Error types for profile and review operations.

use neighborhood_common::FieldError;
use neighborhood_database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("사용자가 존재하지 않습니다.")]
    UserNotFound,

    #[error("{0}")]
    InvalidField(#[from] FieldError),

    #[error("이미 사용중인 이메일입니다.")]
    EmailTaken,

    #[error("이미 사용중인 전화번호입니다.")]
    PhoneTaken,

    #[error("자기 자신에게는 후기를 남길 수 없습니다.")]
    SelfReview,

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

pub type UserResult<T> = Result<T, UserError>;
