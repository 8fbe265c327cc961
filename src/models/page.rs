//! One page of list results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::restaurant::Restaurant;

/// Wire shape of `GET /api/restaurants`.
#[derive(Debug, Deserialize)]
pub struct RawRestaurantPage {
    pub restaurants: Vec<Value>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// A decoded page of restaurants.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RestaurantPage {
    pub restaurants: Vec<Restaurant>,
    pub total_pages: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    /// Records dropped because they did not match the schema
    #[serde(skip_serializing_if = "is_zero")]
    pub rejected: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl From<RawRestaurantPage> for RestaurantPage {
    fn from(raw: RawRestaurantPage) -> Self {
        let mut rejected = 0;
        let restaurants = raw
            .restaurants
            .into_iter()
            .filter_map(|value| match Restaurant::from_value(value) {
                Ok(restaurant) => Some(restaurant),
                Err(e) => {
                    tracing::warn!("Skipping restaurant record: {}", e);
                    rejected += 1;
                    None
                }
            })
            .collect();

        Self {
            restaurants,
            total_pages: raw.total_pages,
            total_count: raw.total_count,
            rejected,
        }
    }
}
