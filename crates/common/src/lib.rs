//! # Neighborhood Common Crate
//!
//! Small, stateless helpers used by several domain crates:
//!
//! - **time**: Korean date and relative-time formatting, day sections for chat logs
//! - **manner**: manner degree aggregation and review box parsing
//! - **forms**: field rules for the request bodies posted by the web forms

pub mod forms;
pub mod manner;
pub mod time;

pub use forms::{Field, FieldError, InputKind};
pub use manner::{get_manner_degree, review_boxes};
pub use time::{DateSection, TimeFormatter, Timestamped};
