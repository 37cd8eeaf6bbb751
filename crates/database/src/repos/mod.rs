//! Repositories wrapping the hand-written SQL for each aggregate

pub mod chat_repository;
pub mod post_repository;
pub mod product_repository;
pub mod review_repository;
pub mod stream_repository;
pub mod user_repository;

pub use chat_repository::ChatRepository;
pub use post_repository::PostRepository;
pub use product_repository::ProductRepository;
pub use review_repository::ReviewRepository;
pub use stream_repository::StreamRepository;
pub use user_repository::UserRepository;
