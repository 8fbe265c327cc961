//! Record shape sent on create and update.

use serde::{Deserialize, Serialize};

use super::attributes::{PriceRange, WifiTier};
use super::parking::ParkingFlags;

/// Body of `POST /api/restaurants` and `PUT /api/restaurants/{id}`.
///
/// The backend folds `price_range`, `wifi` and `parking` into the record's
/// attribute bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantPayload {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub categories: String,
    pub price_range: PriceRange,
    pub wifi: WifiTier,
    pub parking: ParkingFlags,
}

/// Acknowledgement returned by mutating endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}
