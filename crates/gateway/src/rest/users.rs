//! Profile, sales and review endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use neighborhood_users::{
    CreateReviewRequest, EditProfileRequest, ProfileView, ReviewView, SaleView, UserView,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::GatewayResult;
use crate::middleware::{ApiJson, ApiPath, CurrentUser};
use crate::rest::{ok, OkResponse};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub ok: bool,
    pub profile: UserView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalesResponse {
    pub ok: bool,
    pub sales: Vec<SaleView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub ok: bool,
    pub profile: ProfileView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub ok: bool,
    pub review: ReviewView,
}

pub fn create_user_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/users/me", get(me).put(edit_profile).delete(delete_account))
        .route("/users/me/sales", get(sales))
        .route("/users/:id", get(profile))
        .route("/users/:id/reviews", post(create_review))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Signed-in user", body = MeResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn me(
    State(state): State<Arc<GatewayState>>,
    current: CurrentUser,
) -> GatewayResult<Json<MeResponse>> {
    let profile = state.user_service.me(current.user.id).await?;
    Ok(Json(MeResponse { ok: true, profile }))
}

#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "Users",
    request_body = EditProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = OkResponse),
        (status = 400, description = "Invalid or taken field", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn edit_profile(
    State(state): State<Arc<GatewayState>>,
    current: CurrentUser,
    ApiJson(payload): ApiJson<EditProfileRequest>,
) -> GatewayResult<Json<OkResponse>> {
    state.user_service.update_profile(current.user.id, payload).await?;
    Ok(ok())
}

#[utoipa::path(
    delete,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Account deleted", body = OkResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_account(
    State(state): State<Arc<GatewayState>>,
    current: CurrentUser,
) -> GatewayResult<Json<OkResponse>> {
    state.user_service.delete_account(current.user.id).await?;
    Ok(ok())
}

#[utoipa::path(
    get,
    path = "/api/users/me/sales",
    tag = "Users",
    responses(
        (status = 200, description = "Products sold by the signed-in user", body = SalesResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn sales(
    State(state): State<Arc<GatewayState>>,
    current: CurrentUser,
) -> GatewayResult<Json<SalesResponse>> {
    let sales = state.user_service.sales(current.user.id).await?;
    Ok(Json(SalesResponse { ok: true, sales }))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Public profile with reviews", body = ProfileResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn profile(
    State(state): State<Arc<GatewayState>>,
    ApiPath(user_id): ApiPath<i64>,
) -> GatewayResult<Json<ProfileResponse>> {
    let profile = state.review_service.profile(user_id).await?;
    Ok(Json(ProfileResponse { ok: true, profile }))
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/reviews",
    tag = "Users",
    params(("id" = i64, Path, description = "Reviewed user id")),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review left", body = ReviewResponse),
        (status = 400, description = "Invalid review", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_review(
    State(state): State<Arc<GatewayState>>,
    ApiPath(user_id): ApiPath<i64>,
    current: CurrentUser,
    ApiJson(payload): ApiJson<CreateReviewRequest>,
) -> GatewayResult<(StatusCode, Json<ReviewResponse>)> {
    let review = state
        .review_service
        .create_review(current.user.id, user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(ReviewResponse { ok: true, review })))
}
