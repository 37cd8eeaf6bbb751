//! # Neighborhood Chats Crate
//!
//! Chat rooms opened between the seller of a product and a prospective buyer.
//! Reading a room returns its messages both as a flat list and grouped into
//! day sections with Korean clock labels.

pub mod services;
pub mod types;

pub use services::ChatService;
pub use types::{
    ChatError, ChatMessageView, ChatResult, ChatRoomView, ChatSection, ChatSender, ChatView,
    SendChatRequest,
};
