//! Restaurant record as returned by the backend.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::attributes::Attributes;
use super::lenient;
use crate::errors::AppError;

/// Days of the week in display order.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Opaque restaurant identifier.
///
/// The backend emits either a plain string or an extended-JSON object
/// (`{"$oid": "..."}`); both decode to the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RestaurantId(String);

impl RestaurantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RestaurantId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Plain(String),
            Extended {
                #[serde(rename = "$oid")]
                oid: String,
            },
        }

        let id = match RawId::deserialize(deserializer)? {
            RawId::Plain(id) => id,
            RawId::Extended { oid } => oid,
        };
        if id.trim().is_empty() {
            return Err(serde::de::Error::custom("empty restaurant id"));
        }
        Ok(RestaurantId(id))
    }
}

/// A restaurant listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "_id")]
    pub id: RestaurantId,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub state: String,
    /// Comma-delimited category list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    /// Star rating, 0 to 5 in half steps
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub stars: f64,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub review_count: u32,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub attributes: Attributes,
    /// Opening hours keyed by day name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<BTreeMap<String, String>>,
}

impl Restaurant {
    /// Decode one record from an untyped JSON value, rejecting malformed records.
    pub fn from_value(value: serde_json::Value) -> Result<Self, AppError> {
        serde_json::from_value(value).map_err(|e| AppError::InvalidRecord(e.to_string()))
    }

    /// Individual categories, trimmed, without empty entries.
    pub fn category_list(&self) -> Vec<&str> {
        self.categories
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Opening hours in weekday order; unknown day names follow alphabetically.
    pub fn weekly_hours(&self) -> Vec<(&str, &str)> {
        let Some(hours) = &self.hours else {
            return Vec::new();
        };

        let mut ordered: Vec<(&str, &str)> = WEEKDAYS
            .iter()
            .filter_map(|day| hours.get(*day).map(|h| (*day, h.as_str())))
            .collect();
        ordered.extend(
            hours
                .iter()
                .filter(|(day, _)| !WEEKDAYS.contains(&day.as_str()))
                .map(|(day, h)| (day.as_str(), h.as_str())),
        );
        ordered
    }

    /// Single-line location, e.g. `123 Main St, Tampa, FL`.
    pub fn location_line(&self) -> String {
        format!("{}, {}, {}", self.address, self.city, self.state)
    }
}
