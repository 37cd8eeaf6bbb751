pub mod errors;
pub mod requests;
pub mod responses;

pub use errors::{ChatError, ChatResult};
pub use requests::SendChatRequest;
pub use responses::{ChatMessageView, ChatRoomView, ChatSection, ChatSender, ChatView};
