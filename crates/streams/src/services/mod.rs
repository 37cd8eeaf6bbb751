pub mod stream_service;

pub use stream_service::{StreamService, STREAMS_PER_PAGE};
