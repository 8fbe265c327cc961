//! Attribute badges shown on each card.

use std::fmt;

use crate::models::{AlcoholTier, Attributes, WifiTier};

/// A short tag derived from the attribute bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    /// Number of currency symbols
    Price(usize),
    Wifi(WifiTier),
    Alcohol(AlcoholTier),
    Delivery,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::Price(count) => f.write_str(&"$".repeat(*count)),
            Badge::Wifi(tier) => write!(f, "WiFi: {}", tier.as_str()),
            Badge::Alcohol(tier) => f.write_str(tier.as_str()),
            Badge::Delivery => f.write_str("Delivery Available"),
        }
    }
}

/// Price badge text, e.g. `$$$`.
pub fn price_badge(attributes: &Attributes) -> String {
    Badge::Price(attributes.price_symbol_count()).to_string()
}

/// Badges in display order. Price is always shown; the rest only when present.
pub fn badges(attributes: &Attributes) -> Vec<Badge> {
    let mut badges = vec![Badge::Price(attributes.price_symbol_count())];
    if let Some(wifi) = attributes.wifi {
        badges.push(Badge::Wifi(wifi));
    }
    if let Some(alcohol) = attributes.alcohol {
        badges.push(Badge::Alcohol(alcohol));
    }
    if attributes.delivery == Some(true) {
        badges.push(Badge::Delivery);
    }
    badges
}
