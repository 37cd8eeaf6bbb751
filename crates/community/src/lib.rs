//! # Neighborhood Community Crate
//!
//! The neighborhood board: questions and stories posted by users, the
//! answers left under them, and recommendations. Only the author may edit or
//! delete a post.

pub mod services;
pub mod types;

pub use services::PostService;
pub use types::{
    AnswerView, CreateAnswerRequest, CreatePostRequest, PostAuthor, PostCount, PostDetailView,
    PostError, PostResult, PostSummary, PostView, RecommendationView, UpdatePostRequest,
};
