pub mod review_service;
pub mod user_service;

pub use review_service::ReviewService;
pub use user_service::UserService;
