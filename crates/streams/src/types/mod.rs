pub mod errors;
pub mod requests;
pub mod responses;

pub use errors::{StreamError, StreamResult};
pub use requests::CreateStreamRequest;
pub use responses::StreamView;
