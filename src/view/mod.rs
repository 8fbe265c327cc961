//! Text rendering of the restaurant list and detail view.
//!
//! Everything here is a pure function of the records handed in; no view keeps
//! its own copy of the data.

mod badges;
mod card;
mod detail;
mod stars;

pub use badges::*;
pub use card::*;
pub use detail::*;
pub use stars::*;
