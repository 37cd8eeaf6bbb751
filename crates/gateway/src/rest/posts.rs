//! Community board endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use neighborhood_community::{
    AnswerView, CreateAnswerRequest, CreatePostRequest, PostDetailView, PostSummary,
    RecommendationView, UpdatePostRequest,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::GatewayResult;
use crate::middleware::{ApiJson, ApiPath, CurrentUser};
use crate::rest::{ok, OkResponse};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct PostDetailResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub detail: PostDetailView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    pub ok: bool,
    pub post: PostSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub recommendation: RecommendationView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerResponse {
    pub ok: bool,
    pub answer: AnswerView,
}

pub fn create_post_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/:id", get(get_post).put(update_post).delete(delete_post))
        .route("/posts/:id/recommendation", post(toggle_recommendation))
        .route("/posts/:id/answers", post(create_answer))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Missing title or content", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_post(
    State(state): State<Arc<GatewayState>>,
    current: CurrentUser,
    ApiJson(payload): ApiJson<CreatePostRequest>,
) -> GatewayResult<(StatusCode, Json<PostResponse>)> {
    let post = state.post_service.create_post(current.user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(PostResponse { ok: true, post })))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post with answers and counts", body = PostDetailResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Post not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_post(
    State(state): State<Arc<GatewayState>>,
    ApiPath(post_id): ApiPath<i64>,
    current: CurrentUser,
) -> GatewayResult<Json<PostDetailResponse>> {
    let detail = state.post_service.get_post(post_id, current.user.id).await?;
    Ok(Json(PostDetailResponse { ok: true, detail }))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 400, description = "Blank title or content", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Post missing or written by someone else", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn update_post(
    State(state): State<Arc<GatewayState>>,
    ApiPath(post_id): ApiPath<i64>,
    current: CurrentUser,
    ApiJson(payload): ApiJson<UpdatePostRequest>,
) -> GatewayResult<Json<PostResponse>> {
    let post = state
        .post_service
        .update_post(post_id, current.user.id, payload)
        .await?;
    Ok(Json(PostResponse { ok: true, post }))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = OkResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Post missing or written by someone else", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_post(
    State(state): State<Arc<GatewayState>>,
    ApiPath(post_id): ApiPath<i64>,
    current: CurrentUser,
) -> GatewayResult<Json<OkResponse>> {
    state.post_service.delete_post(post_id, current.user.id).await?;
    Ok(ok())
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/recommendation",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Recommendation toggled", body = RecommendationResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Post not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn toggle_recommendation(
    State(state): State<Arc<GatewayState>>,
    ApiPath(post_id): ApiPath<i64>,
    current: CurrentUser,
) -> GatewayResult<Json<RecommendationResponse>> {
    let recommendation = state
        .post_service
        .toggle_recommendation(post_id, current.user.id)
        .await?;
    Ok(Json(RecommendationResponse {
        ok: true,
        recommendation,
    }))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/answers",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    request_body = CreateAnswerRequest,
    responses(
        (status = 201, description = "Answer created", body = AnswerResponse),
        (status = 400, description = "Empty answer", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Post not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_answer(
    State(state): State<Arc<GatewayState>>,
    ApiPath(post_id): ApiPath<i64>,
    current: CurrentUser,
    ApiJson(payload): ApiJson<CreateAnswerRequest>,
) -> GatewayResult<(StatusCode, Json<AnswerResponse>)> {
    let answer = state
        .post_service
        .create_answer(post_id, current.user.id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(AnswerResponse { ok: true, answer })))
}
