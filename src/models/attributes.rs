//! Attribute bag carried by each restaurant record.

use serde::{Deserialize, Serialize};

use super::lenient;
use super::parking::{decode_legacy_parking, ParkingFlags};
use crate::errors::AppError;

/// Price tier, 1 (inexpensive) to 4 (very expensive).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum PriceRange {
    #[default]
    #[serde(rename = "1")]
    Inexpensive,
    #[serde(rename = "2")]
    Moderate,
    #[serde(rename = "3")]
    Expensive,
    #[serde(rename = "4")]
    VeryExpensive,
}

impl PriceRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Inexpensive => "1",
            PriceRange::Moderate => "2",
            PriceRange::Expensive => "3",
            PriceRange::VeryExpensive => "4",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(PriceRange::Inexpensive),
            "2" => Some(PriceRange::Moderate),
            "3" => Some(PriceRange::Expensive),
            "4" => Some(PriceRange::VeryExpensive),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceRange::Inexpensive => "$ (Inexpensive)",
            PriceRange::Moderate => "$$ (Moderate)",
            PriceRange::Expensive => "$$$ (Expensive)",
            PriceRange::VeryExpensive => "$$$$ (Very Expensive)",
        }
    }
}

/// WiFi availability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WifiTier {
    #[default]
    #[serde(alias = "none")]
    No,
    Free,
    Paid,
}

impl WifiTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            WifiTier::No => "no",
            WifiTier::Free => "free",
            WifiTier::Paid => "paid",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "no" | "none" => Some(WifiTier::No),
            "free" => Some(WifiTier::Free),
            "paid" => Some(WifiTier::Paid),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WifiTier::No => "No WiFi",
            WifiTier::Free => "Free WiFi",
            WifiTier::Paid => "Paid WiFi",
        }
    }
}

/// Alcohol service level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlcoholTier {
    None,
    BeerAndWine,
    FullBar,
}

impl AlcoholTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlcoholTier::None => "none",
            AlcoholTier::BeerAndWine => "beer_and_wine",
            AlcoholTier::FullBar => "full_bar",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "none" => Some(AlcoholTier::None),
            "beer_and_wine" => Some(AlcoholTier::BeerAndWine),
            "full_bar" => Some(AlcoholTier::FullBar),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlcoholTier::None => "No Alcohol",
            AlcoholTier::BeerAndWine => "Beer and Wine",
            AlcoholTier::FullBar => "Full Bar",
        }
    }
}

/// Smoking policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SmokingTier {
    No,
    Outdoor,
    Yes,
}

impl SmokingTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmokingTier::No => "no",
            SmokingTier::Outdoor => "outdoor",
            SmokingTier::Yes => "yes",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "no" => Some(SmokingTier::No),
            "outdoor" => Some(SmokingTier::Outdoor),
            "yes" => Some(SmokingTier::Yes),
            _ => None,
        }
    }
}

/// Parking information as stored by the backend.
///
/// Newer records carry a JSON object; imported records carry the Python
/// literal text of a dict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParkingData {
    Flags(ParkingFlags),
    Legacy(String),
}

/// Named restaurant properties nested under `attributes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    /// Raw price tier; kept as text because imported data is not always numeric
    #[serde(
        rename = "RestaurantsPriceRange2",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_range: Option<String>,
    #[serde(rename = "WiFi", default, skip_serializing_if = "Option::is_none")]
    pub wifi: Option<WifiTier>,
    #[serde(rename = "Alcohol", default, skip_serializing_if = "Option::is_none")]
    pub alcohol: Option<AlcoholTier>,
    #[serde(
        rename = "RestaurantsDelivery",
        default,
        deserialize_with = "lenient::flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery: Option<bool>,
    #[serde(
        rename = "DogsAllowed",
        default,
        deserialize_with = "lenient::flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub dogs_allowed: Option<bool>,
    #[serde(rename = "Smoking", default, skip_serializing_if = "Option::is_none")]
    pub smoking: Option<SmokingTier>,
    #[serde(
        rename = "BusinessParking",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parking: Option<ParkingData>,
}

impl Attributes {
    /// Parsed price tier, if the raw value is one of `1..=4`.
    pub fn price_tier(&self) -> Option<PriceRange> {
        self.price_range.as_deref().and_then(PriceRange::from_str)
    }

    /// Number of currency symbols to display for the price tier.
    ///
    /// Uses the leading integer of the raw value; zero or unparsable yields 1.
    pub fn price_symbol_count(&self) -> usize {
        let digits: String = self
            .price_range
            .as_deref()
            .unwrap_or_default()
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        match digits.parse::<usize>() {
            Ok(0) | Err(_) => 1,
            Ok(count) => count,
        }
    }

    /// Decode the parking data strictly.
    ///
    /// Returns `Ok(None)` when the record carries no parking information.
    pub fn parking_flags(&self) -> Result<Option<ParkingFlags>, AppError> {
        match &self.parking {
            None => Ok(None),
            Some(ParkingData::Flags(flags)) => Ok(Some(*flags)),
            Some(ParkingData::Legacy(raw)) if raw.trim() == "None" => Ok(None),
            Some(ParkingData::Legacy(raw)) => decode_legacy_parking(raw).map(Some),
        }
    }
}
