//! REST API module.
//!
//! Thin client over the backend's `/api` endpoints. Every call maps to exactly
//! one HTTP request; there is no caching, retry or deduplication.

mod client;

pub use client::*;
