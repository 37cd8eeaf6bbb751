//! REST API endpoints for the gateway

pub mod auth;
pub mod chats;
pub mod health;
pub mod posts;
pub mod streams;
pub mod users;

use std::sync::Arc;

use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::GatewayState;

/// Success envelope for endpoints that return nothing else.
#[derive(Debug, Serialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

pub(crate) fn ok() -> Json<OkResponse> {
    Json(OkResponse { ok: true })
}

/// Create all REST API routes, relative to `/api`
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .merge(auth::create_auth_routes())
        .merge(users::create_user_routes())
        .merge(chats::create_chat_routes())
        .merge(posts::create_post_routes())
        .merge(streams::create_stream_routes())
}
