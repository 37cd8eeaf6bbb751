//! Reading and writing chat rooms.

use neighborhood_common::{DateSection, Field, InputKind, TimeFormatter};
use neighborhood_database::{ChatRepository, ChatRoom};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::types::{
    ChatError, ChatMessageView, ChatResult, ChatRoomView, ChatSection, ChatView, SendChatRequest,
};

const MISSING_CHAT: &str = "*메시지를 입력해주세요.";

#[derive(Clone)]
pub struct ChatService {
    chats: ChatRepository,
    formatter: TimeFormatter,
}

impl ChatService {
    pub fn new(pool: SqlitePool, formatter: TimeFormatter) -> Self {
        Self {
            chats: ChatRepository::new(pool),
            formatter,
        }
    }

    /// Loads a room the user takes part in, with its messages in send order.
    pub async fn get_room(&self, room_id: i64, user_id: i64) -> ChatResult<ChatRoomView> {
        let room = self.participant_room(room_id, user_id).await?;
        let chats: Vec<ChatView> = self
            .chats
            .chats_in_room(room.id)
            .await?
            .into_iter()
            .map(ChatView::from)
            .collect();

        let sections = self.sections(chats.clone());
        debug!(room_id, messages = chats.len(), sections = sections.len(), "chat room loaded");

        Ok(ChatRoomView {
            id: room.id,
            product_id: room.product_id,
            seller_id: room.seller_id,
            buyer_id: room.buyer_id,
            created: room.created_at,
            chats,
            sections,
        })
    }

    pub async fn send_chat(
        &self,
        room_id: i64,
        user_id: i64,
        request: SendChatRequest,
    ) -> ChatResult<ChatMessageView> {
        Field::new("chat", InputKind::Text)
            .required(MISSING_CHAT)
            .check(Some(&request.chat))?;

        let room = self.participant_room(room_id, user_id).await?;
        let chat = self
            .chats
            .create_chat(room.id, user_id, request.chat.trim())
            .await?;
        info!(room_id, chat_id = chat.id, user_id, "chat sent");

        // Re-read so the sender's avatar comes along.
        let line = self
            .chats
            .find_line(chat.id)
            .await?
            .ok_or(ChatError::RoomNotFound)?;

        Ok(self.message_view(line.into()))
    }

    async fn participant_room(&self, room_id: i64, user_id: i64) -> ChatResult<ChatRoom> {
        match self.chats.find_room(room_id).await? {
            Some(room) if room.has_participant(user_id) => Ok(room),
            _ => Err(ChatError::RoomNotFound),
        }
    }

    fn sections(&self, chats: Vec<ChatView>) -> Vec<ChatSection> {
        self.formatter
            .divide_date(chats)
            .into_iter()
            .map(|DateSection { date, entries }| ChatSection {
                date,
                chats: entries
                    .into_iter()
                    .map(|chat| self.message_view(chat))
                    .collect(),
            })
            .collect()
    }

    fn message_view(&self, chat: ChatView) -> ChatMessageView {
        ChatMessageView {
            id: chat.id,
            time: self.formatter.message_time(chat.created),
            chat: chat.chat,
            created: chat.created,
            user: chat.user,
        }
    }
}
