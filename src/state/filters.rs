//! Filter selection and partial updates.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::{AlcoholTier, ParkingKind, PriceRange, SmokingTier, WifiTier};

/// Placeholder value some front-ends send for "no selection".
const DONT_INCLUDE: &str = "don't include";

/// Parking filter: each kind is independently required, excluded or unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParkingFilter(BTreeMap<ParkingKind, bool>);

impl ParkingFilter {
    pub fn get(&self, kind: ParkingKind) -> Option<bool> {
        self.0.get(&kind).copied()
    }

    pub fn with(mut self, kind: ParkingKind, value: bool) -> Self {
        self.0.insert(kind, value);
        self
    }

    /// Copy of this filter with one kind flipped; an unset kind becomes required.
    pub fn toggled(&self, kind: ParkingKind) -> Self {
        let next = !self.get(kind).unwrap_or(false);
        self.clone().with(kind, next)
    }

    /// Number of kinds currently required.
    pub fn enabled_count(&self) -> usize {
        self.0.values().filter(|v| **v).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON object embedded in the `parking` query parameter.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Parse the JSON object form, e.g. `{"garage": true}`.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let map: BTreeMap<String, serde_json::Value> = serde_json::from_str(raw)
            .map_err(|e| AppError::InvalidFilter(format!("parking: {}", e)))?;

        let mut filter = ParkingFilter::default();
        for (key, value) in map {
            let kind = ParkingKind::from_str(&key)
                .ok_or_else(|| AppError::InvalidFilter(format!("unknown parking kind {:?}", key)))?;
            let value = match value {
                serde_json::Value::Bool(b) => b,
                serde_json::Value::String(s) => parse_bool(&s)?,
                other => {
                    return Err(AppError::InvalidFilter(format!(
                        "parking {} must be a boolean, got {}",
                        key, other
                    )))
                }
            };
            filter = filter.with(kind, value);
        }
        Ok(filter)
    }
}

/// Current filter selection. `None` means the filter is not applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterState {
    pub name: Option<String>,
    pub city: Option<String>,
    pub price_range_min: Option<PriceRange>,
    pub categories: Option<String>,
    pub category: Option<String>,
    pub wifi: Option<WifiTier>,
    pub alcohol: Option<AlcoholTier>,
    pub delivery: Option<bool>,
    pub pets_allowed: Option<bool>,
    pub parking: Option<ParkingFilter>,
    pub smoking: Option<SmokingTier>,
    pub min_stars: Option<u8>,
}

/// A single-key update to [`FilterState`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    Name(Option<String>),
    City(Option<String>),
    PriceRangeMin(Option<PriceRange>),
    Categories(Option<String>),
    Category(Option<String>),
    Wifi(Option<WifiTier>),
    Alcohol(Option<AlcoholTier>),
    Delivery(Option<bool>),
    PetsAllowed(Option<bool>),
    /// Carries the complete, already-updated parking sub-object.
    Parking(Option<ParkingFilter>),
    Smoking(Option<SmokingTier>),
    MinStars(Option<u8>),
}

impl FilterChange {
    /// Parse a `key=value` pair entered in the front-end.
    ///
    /// Empty values (and the `don't include` placeholder) clear the filter.
    pub fn parse(key: &str, raw: &str) -> Result<Self, AppError> {
        let value = normalize(raw);
        let value = value.as_deref();

        let change = match key.trim() {
            "name" => FilterChange::Name(value.map(str::to_string)),
            "city" => FilterChange::City(value.map(str::to_string)),
            "categories" => FilterChange::Categories(value.map(str::to_string)),
            "category" => FilterChange::Category(value.map(str::to_string)),
            "price_range_min" | "price" => FilterChange::PriceRangeMin(
                value.map(|v| parse_with(v, "price_range_min", PriceRange::from_str)).transpose()?,
            ),
            "wifi" => FilterChange::Wifi(
                value.map(|v| parse_with(v, "wifi", WifiTier::from_str)).transpose()?,
            ),
            "alcohol" => FilterChange::Alcohol(
                value.map(|v| parse_with(v, "alcohol", AlcoholTier::from_str)).transpose()?,
            ),
            "smoking" => FilterChange::Smoking(
                value.map(|v| parse_with(v, "smoking", SmokingTier::from_str)).transpose()?,
            ),
            "delivery" => FilterChange::Delivery(value.map(parse_bool).transpose()?),
            "pets_allowed" | "pets" => FilterChange::PetsAllowed(value.map(parse_bool).transpose()?),
            "parking" => FilterChange::Parking(
                value
                    .map(ParkingFilter::from_json)
                    .transpose()?
                    .filter(|p| !p.is_empty()),
            ),
            "minStars" | "min_stars" | "stars" => {
                FilterChange::MinStars(value.map(parse_min_stars).transpose()?)
            }
            other => {
                return Err(AppError::InvalidFilter(format!(
                    "unknown filter key {:?}",
                    other
                )))
            }
        };
        Ok(change)
    }
}

impl FilterState {
    /// Apply one change in place.
    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::Name(v) => self.name = v.and_then(|s| normalize(&s)),
            FilterChange::City(v) => self.city = v.and_then(|s| normalize(&s)),
            FilterChange::PriceRangeMin(v) => self.price_range_min = v,
            FilterChange::Categories(v) => self.categories = v.and_then(|s| normalize(&s)),
            FilterChange::Category(v) => self.category = v.and_then(|s| normalize(&s)),
            FilterChange::Wifi(v) => self.wifi = v,
            FilterChange::Alcohol(v) => self.alcohol = v,
            FilterChange::Delivery(v) => self.delivery = v,
            FilterChange::PetsAllowed(v) => self.pets_allowed = v,
            FilterChange::Parking(v) => self.parking = v.filter(|p| !p.is_empty()),
            FilterChange::Smoking(v) => self.smoking = v,
            FilterChange::MinStars(v) => self.min_stars = v,
        }
    }

    /// Shallow merge: a copy of `self` with `changes` applied; unnamed keys keep their value.
    pub fn merged<I>(&self, changes: I) -> FilterState
    where
        I: IntoIterator<Item = FilterChange>,
    {
        let mut next = self.clone();
        for change in changes {
            next.apply(change);
        }
        next
    }

    /// Current parking sub-object, or an empty one.
    pub fn parking_or_default(&self) -> ParkingFilter {
        self.parking.clone().unwrap_or_default()
    }

    /// Number of active filters, not counting the city search and the price
    /// selector (shown inline); each required parking kind counts once.
    pub fn active_count(&self) -> usize {
        let singles = [
            self.name.is_some(),
            self.categories.is_some(),
            self.category.is_some(),
            self.wifi.is_some(),
            self.alcohol.is_some(),
            self.delivery.is_some(),
            self.pets_allowed.is_some(),
            self.smoking.is_some(),
            self.min_stars.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count();

        singles + self.parking.as_ref().map_or(0, ParkingFilter::enabled_count)
    }
}

/// Trim, and map empty and placeholder values to `None`.
pub(crate) fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(DONT_INCLUDE) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_with<T>(raw: &str, key: &str, parse: fn(&str) -> Option<T>) -> Result<T, AppError> {
    parse(raw).ok_or_else(|| AppError::InvalidFilter(format!("invalid {} value {:?}", key, raw)))
}

fn parse_bool(raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" => Ok(true),
        "false" | "no" => Ok(false),
        other => Err(AppError::InvalidFilter(format!(
            "expected true or false, got {:?}",
            other
        ))),
    }
}

fn parse_min_stars(raw: &str) -> Result<u8, AppError> {
    match raw.trim().parse::<u8>() {
        Ok(stars) if stars <= 5 => Ok(stars),
        _ => Err(AppError::InvalidFilter(format!(
            "minStars must be between 0 and 5, got {:?}",
            raw
        ))),
    }
}
