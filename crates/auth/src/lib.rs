//! Contact based sign-in.
//!
//! A user enters an email address or phone number, receives a six digit
//! login token and trades it for a bearer session.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use neighborhood_common::{Field, FieldError, InputKind};
use neighborhood_config::AuthConfig;
use neighborhood_database::{DatabaseError, User, UserRepository};
use rand::{Rng, RngCore};
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Name given to users created on their first sign-in.
pub const ANONYMOUS_NAME: &str = "익명";

const MISSING_CONTACT: &str = "이메일 혹은 전화번호 중 하나를 입력하세요.";
const MISSING_TOKEN: &str = "*인증번호를 입력해주세요.";
const PAYLOAD_ATTEMPTS: usize = 5;
/// Upper bound for configured lifetimes, ten years.
const MAX_TTL_SECONDS: u64 = 10 * 365 * 86_400;

#[derive(Clone)]
pub struct Authenticator {
    pool: SqlitePool,
    users: UserRepository,
    session_ttl: Duration,
    login_token_ttl: Duration,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidField(#[from] FieldError),
    #[error("인증번호가 존재하지 않습니다.")]
    LoginTokenNotFound,
    #[error("인증번호가 만료되었습니다.")]
    LoginTokenExpired,
    #[error("could not allocate a unique login token")]
    LoginTokenExhausted,
    #[error("session not found")]
    SessionNotFound,
    #[error("session expired")]
    SessionExpired,
    #[error("invalid session token")]
    InvalidSession,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("repository error: {0}")]
    Repository(#[from] DatabaseError),
}

/// The contact a user signs in with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    Email(String),
    Phone(String),
}

impl Contact {
    /// Picks the contact out of a sign-in form. The phone number wins when
    /// both are filled in.
    pub fn from_form(email: Option<&str>, phone: Option<&str>) -> Result<Self, AuthError> {
        if let Some(phone) = filled(phone) {
            Field::new("phone", InputKind::Phone).check(Some(phone))?;
            return Ok(Contact::Phone(InputKind::Phone.normalize(phone)));
        }

        if let Some(email) = filled(email) {
            Field::new("email", InputKind::Email).check(Some(email))?;
            return Ok(Contact::Email(InputKind::Email.normalize(email)));
        }

        Err(FieldError::new("contact", MISSING_CONTACT).into())
    }

    fn kind(&self) -> &'static str {
        match self {
            Contact::Email(_) => "email",
            Contact::Phone(_) => "phone",
        }
    }
}

fn filled(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginToken {
    pub payload: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

impl Authenticator {
    pub fn new(pool: SqlitePool, config: &AuthConfig) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            pool,
            session_ttl: seconds(config.session_ttl_seconds),
            login_token_ttl: seconds(config.login_token_ttl_seconds),
        }
    }

    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Finds or creates the user behind `contact` and stores a fresh login
    /// token for them.
    pub async fn enter(&self, contact: &Contact) -> Result<LoginToken, AuthError> {
        let user = self.find_or_create_user(contact).await?;
        let now = Utc::now();
        let expires_at = now + self.login_token_ttl;

        for _ in 0..PAYLOAD_ATTEMPTS {
            let payload = generate_payload();
            let inserted = sqlx::query(
                "INSERT INTO login_tokens (user_id, payload, created_at, expires_at) VALUES (?, ?, ?, ?)",
            )
            .bind(user.id)
            .bind(&payload)
            .bind(now.to_rfc3339())
            .bind(expires_at.to_rfc3339())
            .execute(&self.pool)
            .await;

            match inserted {
                Ok(_) => {
                    // Delivery by mail or text message is left to an outside relay.
                    info!(user_id = user.id, contact = contact.kind(), %payload, "login token issued");
                    return Ok(LoginToken {
                        payload,
                        user_id: user.id,
                        expires_at,
                    });
                }
                Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                    debug!("login token payload collided, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(AuthError::LoginTokenExhausted)
    }

    /// Trades a login token for a session. Every other token of the user is
    /// dropped.
    pub async fn confirm(&self, payload: &str) -> Result<AuthSession, AuthError> {
        Field::new("token", InputKind::Token)
            .required(MISSING_TOKEN)
            .check(Some(payload))?;
        let payload = InputKind::Token.normalize(payload);

        let row = sqlx::query("SELECT user_id, expires_at FROM login_tokens WHERE payload = ?")
            .bind(&payload)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Err(AuthError::LoginTokenNotFound);
        };

        let user_id: i64 = row.try_get("user_id")?;
        let expires_at: DateTime<Utc> = row.try_get("expires_at")?;

        if expires_at <= Utc::now() {
            sqlx::query("DELETE FROM login_tokens WHERE payload = ?")
                .bind(&payload)
                .execute(&self.pool)
                .await?;
            return Err(AuthError::LoginTokenExpired);
        }

        sqlx::query("DELETE FROM login_tokens WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        let session = self.issue_session(user_id).await?;
        info!(user_id, "login token confirmed");
        Ok(session)
    }

    pub async fn authenticate_token(&self, token: &str) -> Result<(User, AuthSession), AuthError> {
        let row = sqlx::query("SELECT user_id, expires_at FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Err(AuthError::SessionNotFound);
        };

        let user_id: i64 = row.try_get("user_id")?;
        let expires_at: DateTime<Utc> = row.try_get("expires_at")?;

        if expires_at <= Utc::now() {
            sqlx::query("DELETE FROM sessions WHERE token = ?")
                .bind(token)
                .execute(&self.pool)
                .await?;
            return Err(AuthError::SessionExpired);
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidSession)?;

        let session = AuthSession {
            token: token.to_owned(),
            user_id,
            expires_at,
        };

        Ok((user, session))
    }

    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::SessionNotFound);
        }
        Ok(())
    }

    pub async fn issue_session(&self, user_id: i64) -> Result<AuthSession, AuthError> {
        let token = generate_session_token();
        let now = Utc::now();
        let expires_at = now + self.session_ttl;

        sqlx::query(
            "INSERT INTO sessions (user_id, token, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&token)
        .bind(now.to_rfc3339())
        .bind(expires_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(AuthSession {
            token,
            user_id,
            expires_at,
        })
    }

    async fn find_or_create_user(&self, contact: &Contact) -> Result<User, AuthError> {
        if let Some(user) = self.find_user(contact).await? {
            return Ok(user);
        }

        let (email, phone) = match contact {
            Contact::Email(email) => (Some(email.as_str()), None),
            Contact::Phone(phone) => (None, Some(phone.as_str())),
        };

        match self.users.create(ANONYMOUS_NAME, email, phone).await {
            Ok(user) => Ok(user),
            // Someone else registered the same contact in between.
            Err(DatabaseError::QueryError(sqlx::Error::Database(err))) if err.is_unique_violation() => {
                warn!(contact = contact.kind(), "contact registered concurrently");
                self.find_user(contact)
                    .await?
                    .ok_or(AuthError::InvalidSession)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_user(&self, contact: &Contact) -> Result<Option<User>, AuthError> {
        let user = match contact {
            Contact::Email(email) => self.users.find_by_email(email).await?,
            Contact::Phone(phone) => self.users.find_by_phone(phone).await?,
        };
        Ok(user)
    }
}

fn seconds(value: u64) -> Duration {
    Duration::seconds(value.min(MAX_TTL_SECONDS) as i64)
}

fn generate_payload() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_wins_over_email() {
        let contact = Contact::from_form(Some("me@example.com"), Some("010-1234-5678")).unwrap();
        assert_eq!(contact, Contact::Phone("01012345678".into()));
    }

    #[test]
    fn blank_phone_falls_back_to_email() {
        let contact = Contact::from_form(Some(" me@example.com "), Some("  ")).unwrap();
        assert_eq!(contact, Contact::Email("me@example.com".into()));
    }

    #[test]
    fn missing_contact_is_rejected() {
        let err = Contact::from_form(None, Some("")).unwrap_err();
        assert_eq!(err.to_string(), MISSING_CONTACT);
    }

    #[test]
    fn malformed_contact_is_rejected() {
        assert!(matches!(
            Contact::from_form(Some("not-an-email"), None),
            Err(AuthError::InvalidField(_))
        ));
        assert!(matches!(
            Contact::from_form(None, Some("010-abcd")),
            Err(AuthError::InvalidField(_))
        ));
    }

    #[test]
    fn separator_only_phone_is_rejected() {
        for phone in ["-", " - - "] {
            let err = Contact::from_form(None, Some(phone)).unwrap_err();
            assert_eq!(err.to_string(), "*전화번호는 숫자만 입력해주세요.");
        }
    }

    #[test]
    fn payloads_have_six_digits() {
        for _ in 0..100 {
            let payload = generate_payload();
            assert_eq!(payload.len(), 6);
            assert!(payload.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn huge_ttls_saturate() {
        assert_eq!(seconds(u64::MAX), Duration::seconds(MAX_TTL_SECONDS as i64));
        assert_eq!(seconds(60), Duration::minutes(1));
    }
}
