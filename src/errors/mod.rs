//! Error handling module for the restaurant directory client.
//!
//! Every backend failure collapses into one generic error per operation. The
//! underlying status or transport detail is kept for logging only and never
//! becomes part of the user-visible message.

use thiserror::Error;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const FETCH_FAILED: &str = "FETCH_FAILED";
    pub const CREATE_FAILED: &str = "CREATE_FAILED";
    pub const UPDATE_FAILED: &str = "UPDATE_FAILED";
    pub const DELETE_FAILED: &str = "DELETE_FAILED";
    pub const CATEGORIES_FAILED: &str = "CATEGORIES_FAILED";
    pub const FILTERS_FAILED: &str = "FILTERS_FAILED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const PARKING_DECODE_ERROR: &str = "PARKING_DECODE_ERROR";
    pub const INVALID_RECORD: &str = "INVALID_RECORD";
    pub const INVALID_FILTER: &str = "INVALID_FILTER";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Backend operation an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchRestaurants,
    CreateRestaurant,
    UpdateRestaurant,
    DeleteRestaurant,
    FetchCategories,
    FetchFilterOptions,
}

impl Operation {
    /// Generic message shown to the user when this operation fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::FetchRestaurants => "Failed to fetch restaurants",
            Operation::CreateRestaurant => "Failed to create restaurant",
            Operation::UpdateRestaurant => "Failed to update restaurant",
            Operation::DeleteRestaurant => "Failed to delete restaurant",
            Operation::FetchCategories => "Failed to fetch categories",
            Operation::FetchFilterOptions => "Failed to fetch filter options",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Operation::FetchRestaurants => codes::FETCH_FAILED,
            Operation::CreateRestaurant => codes::CREATE_FAILED,
            Operation::UpdateRestaurant => codes::UPDATE_FAILED,
            Operation::DeleteRestaurant => codes::DELETE_FAILED,
            Operation::FetchCategories => codes::CATEGORIES_FAILED,
            Operation::FetchFilterOptions => codes::FILTERS_FAILED,
        }
    }
}

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// A backend call failed (non-2xx status, transport error or undecodable body)
    #[error("{}", operation.failure_message())]
    Request { operation: Operation, detail: String },
    /// Form input rejected before anything was sent
    #[error("{0}")]
    Validation(String),
    /// Legacy parking data could not be decoded
    #[error("Invalid parking data: {0}")]
    ParkingDecode(String),
    /// A record did not match the expected schema
    #[error("Invalid restaurant record: {0}")]
    InvalidRecord(String),
    /// A filter key or value was not recognized
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
    /// Referenced item does not exist in the current view
    #[error("{0}")]
    NotFound(String),
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Build a request failure for `operation`, logging the hidden detail.
    pub fn request(operation: Operation, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        tracing::debug!(?operation, %detail, "request failed");
        AppError::Request { operation, detail }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Request { operation, .. } => operation.code(),
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::ParkingDecode(_) => codes::PARKING_DECODE_ERROR,
            AppError::InvalidRecord(_) => codes::INVALID_RECORD,
            AppError::InvalidFilter(_) => codes::INVALID_FILTER,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// Text shown in the error notification.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_hides_detail() {
        let err = AppError::request(Operation::DeleteRestaurant, "HTTP 404 Not Found");
        assert_eq!(err.to_string(), "Failed to delete restaurant");
        assert_eq!(err.error_code(), codes::DELETE_FAILED);
        assert!(matches!(
            err,
            AppError::Request {
                operation: Operation::DeleteRestaurant,
                ..
            }
        ));
    }

    #[test]
    fn test_local_errors_have_codes() {
        assert_eq!(
            AppError::Validation("Name is required".into()).error_code(),
            codes::VALIDATION_ERROR
        );
        assert_eq!(
            AppError::ParkingDecode("x".into()).to_string(),
            "Invalid parking data: x"
        );
        assert_eq!(
            AppError::Config("bad".into()).error_code(),
            codes::CONFIG_ERROR
        );
    }
}
