//! Shared application state for the gateway

use std::sync::Arc;

use neighborhood_auth::Authenticator;
use neighborhood_chats::ChatService;
use neighborhood_common::TimeFormatter;
use neighborhood_community::PostService;
use neighborhood_config::AppConfig;
use neighborhood_streams::StreamService;
use neighborhood_users::{ReviewService, UserService};
use sqlx::SqlitePool;
use tracing::warn;

use crate::error::GatewayResult;

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    /// Database connection pool
    pub pool: SqlitePool,
    pub authenticator: Arc<Authenticator>,
    pub user_service: Arc<UserService>,
    pub review_service: Arc<ReviewService>,
    pub chat_service: Arc<ChatService>,
    pub post_service: Arc<PostService>,
    pub stream_service: Arc<StreamService>,
}

impl GatewayState {
    /// Create a new gateway state with all services initialized
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Self {
        let formatter = TimeFormatter::from_config(&config.locale).unwrap_or_else(|| {
            warn!(
                utc_offset_minutes = config.locale.utc_offset_minutes,
                "invalid locale offset, falling back to KST"
            );
            TimeFormatter::kst()
        });

        Self {
            authenticator: Arc::new(Authenticator::new(pool.clone(), &config.auth)),
            user_service: Arc::new(UserService::new(pool.clone())),
            review_service: Arc::new(ReviewService::new(pool.clone(), formatter, &config.manner)),
            chat_service: Arc::new(ChatService::new(pool.clone(), formatter)),
            post_service: Arc::new(PostService::new(pool.clone(), formatter)),
            stream_service: Arc::new(StreamService::new(pool.clone(), formatter)),
            pool,
        }
    }

    /// Create gateway state from configuration, opening and migrating the database
    pub async fn from_config(config: &AppConfig) -> GatewayResult<Self> {
        let pool = neighborhood_database::initialize_database(&config.database).await?;
        Ok(Self::new(pool, config))
    }
}
