//! Error types for the gateway layer

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use neighborhood_auth::AuthError;
use neighborhood_chats::ChatError;
use neighborhood_common::FieldError;
use neighborhood_community::PostError;
use neighborhood_database::DatabaseError;
use neighborhood_streams::StreamError;
use neighborhood_users::UserError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

const INTERNAL_MESSAGE: &str = "서버 오류가 발생했습니다.";

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Never shown to the client; the detail only goes to the log.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Failure envelope shared by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn not_found(err: impl ToString) -> Self {
        GatewayError::NotFound(err.to_string())
    }

    fn invalid(err: impl ToString) -> Self {
        GatewayError::InvalidRequest(err.to_string())
    }

    fn internal(err: impl ToString) -> Self {
        GatewayError::Internal(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            GatewayError::Internal(detail) => {
                error!(error = %detail, "request failed");
                INTERNAL_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "ok": false, "error": message }))).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<FieldError> for GatewayError {
    fn from(error: FieldError) -> Self {
        GatewayError::invalid(error)
    }
}

impl From<DatabaseError> for GatewayError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(what) => GatewayError::NotFound(what),
            other => GatewayError::internal(other),
        }
    }
}

impl From<AuthError> for GatewayError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidField(_) | AuthError::LoginTokenExpired => GatewayError::invalid(error),
            AuthError::LoginTokenNotFound => GatewayError::not_found(error),
            AuthError::SessionNotFound | AuthError::SessionExpired | AuthError::InvalidSession => {
                GatewayError::Unauthorized(error.to_string())
            }
            AuthError::LoginTokenExhausted | AuthError::Database(_) | AuthError::Repository(_) => {
                GatewayError::internal(error)
            }
        }
    }
}

impl From<UserError> for GatewayError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::UserNotFound => GatewayError::not_found(error),
            UserError::InvalidField(_)
            | UserError::EmailTaken
            | UserError::PhoneTaken
            | UserError::SelfReview => GatewayError::invalid(error),
            UserError::Database(inner) => inner.into(),
        }
    }
}

impl From<ChatError> for GatewayError {
    fn from(error: ChatError) -> Self {
        match error {
            ChatError::RoomNotFound => GatewayError::not_found(error),
            ChatError::InvalidField(_) => GatewayError::invalid(error),
            ChatError::Database(inner) => inner.into(),
        }
    }
}

impl From<PostError> for GatewayError {
    fn from(error: PostError) -> Self {
        match error {
            PostError::PostNotFound | PostError::CannotEdit | PostError::CannotDelete => {
                GatewayError::not_found(error)
            }
            PostError::InvalidField(_) => GatewayError::invalid(error),
            PostError::Database(inner) => inner.into(),
        }
    }
}

impl From<StreamError> for GatewayError {
    fn from(error: StreamError) -> Self {
        match error {
            StreamError::StreamNotFound => GatewayError::not_found(error),
            StreamError::InvalidField(_) => GatewayError::invalid(error),
            StreamError::Database(inner) => inner.into(),
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rejection: PathRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases: Vec<(GatewayError, StatusCode)> = vec![
            (PostError::CannotEdit.into(), StatusCode::NOT_FOUND),
            (UserError::EmailTaken.into(), StatusCode::BAD_REQUEST),
            (AuthError::SessionExpired.into(), StatusCode::UNAUTHORIZED),
            (ChatError::RoomNotFound.into(), StatusCode::NOT_FOUND),
            (
                StreamError::Database(DatabaseError::ConnectionError("down".into())).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.status_code(), status, "{error}");
        }
    }

    #[test]
    fn domain_messages_pass_through() {
        let error: GatewayError = PostError::CannotDelete.into();
        assert_eq!(error.to_string(), "포스트를 삭제할 수 없습니다.");
    }
}
