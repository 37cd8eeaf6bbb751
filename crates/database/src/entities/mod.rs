//! Row types read from and written to the database

pub mod chat;
pub mod post;
pub mod product;
pub mod review;
pub mod stream;
pub mod user;

pub use chat::{Chat, ChatLine, ChatRoom};
pub use post::{Answer, AnswerLine, CreatePostRequest, Post, PostDetail, PostOwner, UpdatePostRequest};
pub use product::{CreateProductRequest, Product, SaleWithProduct};
pub use review::{CreateReviewRequest, Review, ReviewLine};
pub use stream::{CreateStreamRequest, Stream};
pub use user::{ProfileChanges, User};
