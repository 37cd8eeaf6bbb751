//! Live stream endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use neighborhood_streams::{CreateStreamRequest, StreamView};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::GatewayResult;
use crate::middleware::{ApiJson, ApiPath, ApiQuery, CurrentUser};
use crate::state::GatewayState;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListStreamsQuery {
    /// Page number starting at 1.
    pub page: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StreamResponse {
    pub ok: bool,
    pub stream: StreamView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StreamListResponse {
    pub ok: bool,
    pub page: u32,
    pub streams: Vec<StreamView>,
}

pub fn create_stream_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/streams", get(list_streams).post(create_stream))
        .route("/streams/:id", get(get_stream))
}

#[utoipa::path(
    post,
    path = "/api/streams",
    tag = "Streams",
    request_body = CreateStreamRequest,
    responses(
        (status = 201, description = "Stream created", body = StreamResponse),
        (status = 400, description = "Invalid stream form", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_stream(
    State(state): State<Arc<GatewayState>>,
    current: CurrentUser,
    ApiJson(payload): ApiJson<CreateStreamRequest>,
) -> GatewayResult<(StatusCode, Json<StreamResponse>)> {
    let stream = state
        .stream_service
        .create_stream(current.user.id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(StreamResponse { ok: true, stream })))
}

#[utoipa::path(
    get,
    path = "/api/streams/{id}",
    tag = "Streams",
    params(("id" = i64, Path, description = "Stream id")),
    responses(
        (status = 200, description = "Stream details", body = StreamResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Stream not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_stream(
    State(state): State<Arc<GatewayState>>,
    ApiPath(stream_id): ApiPath<i64>,
    _current: CurrentUser,
) -> GatewayResult<Json<StreamResponse>> {
    let stream = state.stream_service.get_stream(stream_id).await?;
    Ok(Json(StreamResponse { ok: true, stream }))
}

#[utoipa::path(
    get,
    path = "/api/streams",
    tag = "Streams",
    params(ListStreamsQuery),
    responses(
        (status = 200, description = "Newest streams first", body = StreamListResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn list_streams(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(query): ApiQuery<ListStreamsQuery>,
    _current: CurrentUser,
) -> GatewayResult<Json<StreamListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let streams = state.stream_service.list_streams(page).await?;
    Ok(Json(StreamListResponse {
        ok: true,
        page,
        streams,
    }))
}
