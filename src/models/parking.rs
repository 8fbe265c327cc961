//! Parking flags and the legacy parking text decoder.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Kind of parking a restaurant may offer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ParkingKind {
    Garage,
    Street,
    Validated,
    Lot,
    Valet,
}

impl ParkingKind {
    pub const ALL: [ParkingKind; 5] = [
        ParkingKind::Garage,
        ParkingKind::Street,
        ParkingKind::Validated,
        ParkingKind::Lot,
        ParkingKind::Valet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParkingKind::Garage => "garage",
            ParkingKind::Street => "street",
            ParkingKind::Validated => "validated",
            ParkingKind::Lot => "lot",
            ParkingKind::Valet => "valet",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "garage" => Some(ParkingKind::Garage),
            "street" => Some(ParkingKind::Street),
            "validated" => Some(ParkingKind::Validated),
            "lot" => Some(ParkingKind::Lot),
            "valet" => Some(ParkingKind::Valet),
            _ => None,
        }
    }

    /// Capitalized label used in check lists.
    pub fn label(&self) -> &'static str {
        match self {
            ParkingKind::Garage => "Garage",
            ParkingKind::Street => "Street",
            ParkingKind::Validated => "Validated",
            ParkingKind::Lot => "Lot",
            ParkingKind::Valet => "Valet",
        }
    }
}

/// Parking options offered by a restaurant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkingFlags {
    pub garage: bool,
    pub street: bool,
    pub validated: bool,
    pub lot: bool,
    pub valet: bool,
}

impl ParkingFlags {
    pub fn get(&self, kind: ParkingKind) -> bool {
        match kind {
            ParkingKind::Garage => self.garage,
            ParkingKind::Street => self.street,
            ParkingKind::Validated => self.validated,
            ParkingKind::Lot => self.lot,
            ParkingKind::Valet => self.valet,
        }
    }

    pub fn set(&mut self, kind: ParkingKind, value: bool) {
        match kind {
            ParkingKind::Garage => self.garage = value,
            ParkingKind::Street => self.street = value,
            ParkingKind::Validated => self.validated = value,
            ParkingKind::Lot => self.lot = value,
            ParkingKind::Valet => self.valet = value,
        }
    }

    pub fn toggle(&mut self, kind: ParkingKind) {
        self.set(kind, !self.get(kind));
    }
}

/// Decode the Python-literal parking text stored by imported records, e.g.
/// `{'garage': False, 'street': True, 'validated': False, 'lot': False, 'valet': False}`.
///
/// Keys may use single or double quotes; values must be `True`/`False`
/// (either case) or `None`. Unknown or repeated keys are errors.
pub fn decode_legacy_parking(raw: &str) -> Result<ParkingFlags, AppError> {
    let body = raw
        .trim()
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| AppError::ParkingDecode(format!("expected a dict literal, got {:?}", raw)))?;

    let mut flags = ParkingFlags::default();
    if body.trim().is_empty() {
        return Ok(flags);
    }

    let mut seen = Vec::with_capacity(ParkingKind::ALL.len());
    for entry in body.split(',') {
        let (key, value) = entry
            .split_once(':')
            .ok_or_else(|| AppError::ParkingDecode(format!("missing ':' in {:?}", entry.trim())))?;

        let key = unquote(key.trim())
            .ok_or_else(|| AppError::ParkingDecode(format!("unquoted key {:?}", key.trim())))?;
        let kind = ParkingKind::from_str(key)
            .ok_or_else(|| AppError::ParkingDecode(format!("unknown parking kind {:?}", key)))?;
        if seen.contains(&kind) {
            return Err(AppError::ParkingDecode(format!("duplicate key {:?}", key)));
        }
        seen.push(kind);

        let value = match value.trim() {
            "True" | "true" => true,
            "False" | "false" | "None" | "null" => false,
            other => {
                return Err(AppError::ParkingDecode(format!(
                    "invalid value {:?} for {}",
                    other, key
                )))
            }
        };
        flags.set(kind, value);
    }

    Ok(flags)
}

fn unquote(s: &str) -> Option<&str> {
    s.strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .or_else(|| s.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_python_literal() {
        let flags = decode_legacy_parking(
            "{'garage': False, 'street': True, 'validated': False, 'lot': True, 'valet': False}",
        )
        .unwrap();
        assert_eq!(
            flags,
            ParkingFlags {
                street: true,
                lot: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_decode_json_style_and_none() {
        let flags = decode_legacy_parking(r#"{"garage": true, "valet": None}"#).unwrap();
        assert!(flags.garage);
        assert!(!flags.valet);
        assert_eq!(decode_legacy_parking("{}").unwrap(), ParkingFlags::default());
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(decode_legacy_parking("garage").is_err());
        assert!(decode_legacy_parking("{'garage' False}").is_err());
        assert!(decode_legacy_parking("{garage: False}").is_err());
        assert!(decode_legacy_parking("{'helipad': True}").is_err());
        assert!(decode_legacy_parking("{'garage': maybe}").is_err());
        assert!(decode_legacy_parking("{'lot': True, 'lot': False}").is_err());
    }

    #[test]
    fn test_toggle() {
        let mut flags = ParkingFlags::default();
        flags.toggle(ParkingKind::Valet);
        assert!(flags.valet);
        flags.toggle(ParkingKind::Valet);
        assert_eq!(flags, ParkingFlags::default());
    }
}
