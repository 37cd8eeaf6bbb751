//! # Neighborhood Streams Crate
//!
//! Live stream sales announced by users: a title, a price, and a
//! description, listed newest first.

pub mod services;
pub mod types;

pub use services::{StreamService, STREAMS_PER_PAGE};
pub use types::{CreateStreamRequest, StreamError, StreamResult, StreamView};
