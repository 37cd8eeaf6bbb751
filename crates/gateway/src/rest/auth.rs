//! Contact login endpoints

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use neighborhood_auth::Contact;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GatewayResult;
use crate::middleware::{ApiJson, CurrentUser};
use crate::rest::{ok, OkResponse};
use crate::state::GatewayState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct EnterRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfirmRequest {
    /// The six digit login token.
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub ok: bool,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub fn create_auth_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/users/enter", post(enter))
        .route("/users/confirm", post(confirm))
        .route("/users/logout", post(logout))
}

#[utoipa::path(
    post,
    path = "/api/users/enter",
    tag = "Auth",
    request_body = EnterRequest,
    responses(
        (status = 200, description = "Login token issued", body = OkResponse),
        (status = 400, description = "Invalid contact", body = crate::error::ErrorResponse)
    )
)]
pub async fn enter(
    State(state): State<Arc<GatewayState>>,
    ApiJson(payload): ApiJson<EnterRequest>,
) -> GatewayResult<Json<OkResponse>> {
    let contact = Contact::from_form(payload.email.as_deref(), payload.phone.as_deref())?;
    state.authenticator.enter(&contact).await?;
    Ok(ok())
}

#[utoipa::path(
    post,
    path = "/api/users/confirm",
    tag = "Auth",
    request_body = ConfirmRequest,
    responses(
        (status = 200, description = "Session issued", body = SessionResponse),
        (status = 400, description = "Malformed or expired token", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown token", body = crate::error::ErrorResponse)
    )
)]
pub async fn confirm(
    State(state): State<Arc<GatewayState>>,
    ApiJson(payload): ApiJson<ConfirmRequest>,
) -> GatewayResult<Json<SessionResponse>> {
    let session = state.authenticator.confirm(&payload.token).await?;
    Ok(Json(SessionResponse {
        ok: true,
        token: session.token,
        expires_at: session.expires_at,
    }))
}

#[utoipa::path(
    post,
    path = "/api/users/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Session ended", body = OkResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn logout(
    State(state): State<Arc<GatewayState>>,
    current: CurrentUser,
) -> GatewayResult<Json<OkResponse>> {
    state.authenticator.logout(&current.session.token).await?;
    Ok(ok())
}
