//! Filter-option catalog served by `GET /api/filters`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::lenient;
use super::parking::ParkingKind;

/// Values the backend offers for each filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    #[serde(deserialize_with = "lenient::text_list")]
    pub price_range: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list_map")]
    pub parking: BTreeMap<String, Vec<String>>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub pets_allowed: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub delivery: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub alcohol: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub smoking: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub wifi: Vec<String>,
}

impl FilterOptions {
    /// Parking kinds the catalog offers, in canonical order. Unknown names are ignored.
    pub fn parking_kinds(&self) -> Vec<ParkingKind> {
        ParkingKind::ALL
            .into_iter()
            .filter(|kind| self.parking.contains_key(kind.as_str()))
            .collect()
    }
}
