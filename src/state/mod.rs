//! Filter, sort and pagination state.
//!
//! The current selection is one structured value ([`ListParams`]) that is only
//! ever replaced wholesale: partial updates are shallow-merged into a copy of
//! the previous value.

mod filters;
mod params;
mod sequence;
mod store;

pub use filters::*;
pub use params::*;
pub use sequence::*;
pub use store::*;
