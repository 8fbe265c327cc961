//! Data models for the restaurant directory.
//!
//! These models mirror the backend's JSON record shape and decode it strictly at
//! the boundary, so the view layer never has to dig through optional nested fields.

mod attributes;
mod catalog;
mod lenient;
mod page;
mod parking;
mod payload;
mod restaurant;

pub use attributes::*;
pub use catalog::*;
pub use page::*;
pub use parking::*;
pub use payload::*;
pub use restaurant::*;
