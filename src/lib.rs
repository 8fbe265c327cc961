//! Restaurant Directory client
//!
//! Typed client and terminal front-end for the Restaurant Directory REST API:
//! browse, filter, sort and paginate restaurants, and create, edit or delete
//! records through the backend.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod dialog;
pub mod errors;
pub mod form;
pub mod models;
pub mod state;
pub mod view;

pub use api::ApiClient;
pub use app::DirectoryApp;
pub use config::Config;
pub use errors::AppError;

#[cfg(test)]
mod tests;
