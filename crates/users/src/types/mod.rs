pub mod errors;
pub mod requests;
pub mod responses;

pub use errors::{UserError, UserResult};
pub use requests::{CreateReviewRequest, EditProfileRequest};
pub use responses::{
    ProductCount, ProfileView, ReviewAuthor, ReviewView, SaleProductView, SaleView, UserView,
};
