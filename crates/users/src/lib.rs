//! # Neighborhood Users Crate
//!
//! Everything a user sees about themselves and about other people:
//!
//! - **UserService**: the signed-in user's account, profile edits, and sales
//! - **ReviewService**: public profiles with their manner degree, and reviews
//!
//! Services return camelCase view types ready to be embedded in the JSON
//! envelope of the gateway.

pub mod services;
pub mod types;

pub use services::{ReviewService, UserService};
pub use types::{
    CreateReviewRequest, EditProfileRequest, ProductCount, ProfileView, ReviewAuthor, ReviewView,
    SaleProductView, SaleView, UserError, UserResult, UserView,
};
