//! Chat room endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use neighborhood_chats::{ChatMessageView, ChatRoomView, SendChatRequest};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::GatewayResult;
use crate::middleware::{ApiJson, ApiPath, CurrentUser};
use crate::state::GatewayState;

/// The web client reads the room from the `chats` key.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatRoomResponse {
    pub ok: bool,
    pub chats: ChatRoomView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub ok: bool,
    pub chat: ChatMessageView,
}

pub fn create_chat_routes() -> Router<Arc<GatewayState>> {
    Router::new().route("/chats/:id", get(get_room).post(send_chat))
}

#[utoipa::path(
    get,
    path = "/api/chats/{id}",
    tag = "Chats",
    params(("id" = i64, Path, description = "Chat room id")),
    responses(
        (status = 200, description = "Room with messages grouped by day", body = ChatRoomResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Room not found or not a participant", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_room(
    State(state): State<Arc<GatewayState>>,
    ApiPath(room_id): ApiPath<i64>,
    current: CurrentUser,
) -> GatewayResult<Json<ChatRoomResponse>> {
    let room = state.chat_service.get_room(room_id, current.user.id).await?;
    Ok(Json(ChatRoomResponse { ok: true, chats: room }))
}

#[utoipa::path(
    post,
    path = "/api/chats/{id}",
    tag = "Chats",
    params(("id" = i64, Path, description = "Chat room id")),
    request_body = SendChatRequest,
    responses(
        (status = 201, description = "Message sent", body = ChatResponse),
        (status = 400, description = "Empty message", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Room not found or not a participant", body = crate::error::ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn send_chat(
    State(state): State<Arc<GatewayState>>,
    ApiPath(room_id): ApiPath<i64>,
    current: CurrentUser,
    ApiJson(payload): ApiJson<SendChatRequest>,
) -> GatewayResult<(StatusCode, Json<ChatResponse>)> {
    let chat = state
        .chat_service
        .send_chat(room_id, current.user.id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(ChatResponse { ok: true, chat })))
}
