pub mod errors;
pub mod requests;
pub mod responses;

pub use errors::{PostError, PostResult};
pub use requests::{CreateAnswerRequest, CreatePostRequest, UpdatePostRequest};
pub use responses::{
    AnswerView, PostAuthor, PostCount, PostDetailView, PostSummary, PostView, RecommendationView,
};
