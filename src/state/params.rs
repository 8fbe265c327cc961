//! List request parameters and their query-string form.

use serde::Serialize;

use super::filters::FilterState;
use crate::config::DEFAULT_PER_PAGE;
use crate::errors::AppError;

/// Field results are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Stars,
    ReviewCount,
    Name,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Stars => "stars",
            SortField::ReviewCount => "review_count",
            SortField::Name => "name",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "stars" => Some(SortField::Stars),
            "review_count" | "reviews" => Some(SortField::ReviewCount),
            "name" => Some(SortField::Name),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Requested ordering of the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Parse `field` or `field direction` as typed by the user.
    pub fn parse(field: &str, order: Option<&str>) -> Result<Self, AppError> {
        let field = SortField::from_str(field)
            .ok_or_else(|| AppError::InvalidFilter(format!("unknown sort field {:?}", field)))?;
        let order = match order {
            Some(raw) => SortOrder::from_str(raw)
                .ok_or_else(|| AppError::InvalidFilter(format!("unknown sort order {:?}", raw)))?,
            None => SortOrder::default(),
        };
        Ok(Self { field, order })
    }
}

/// Everything a list request carries: filters plus pagination and sort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListParams {
    pub filters: FilterState,
    pub page: u32,
    pub per_page: u32,
    pub sort: Option<Sort>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl ListParams {
    pub fn new(per_page: u32) -> Self {
        Self {
            filters: FilterState::default(),
            page: 1,
            per_page,
            sort: None,
        }
    }

    /// Query parameters in allow-list order; unset and zero values are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let f = &self.filters;
        let mut pairs: Vec<(&'static str, String)> = Vec::new();

        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                pairs.push((key, value.trim().to_string()));
            }
        };

        push("name", f.name.clone());
        push("city", f.city.clone());
        push(
            "price_range_min",
            f.price_range_min.map(|p| p.as_str().to_string()),
        );
        push("categories", f.categories.clone());
        push("category", f.category.clone());
        push("wifi", f.wifi.map(|w| w.as_str().to_string()));
        push("alcohol", f.alcohol.map(|a| a.as_str().to_string()));
        push("delivery", f.delivery.map(|d| d.to_string()));
        push("pets_allowed", f.pets_allowed.map(|p| p.to_string()));
        push(
            "parking",
            f.parking
                .as_ref()
                .filter(|p| !p.is_empty())
                .map(|p| p.to_json()),
        );
        push("smoking", f.smoking.map(|s| s.as_str().to_string()));
        push(
            "minStars",
            f.min_stars.filter(|s| *s > 0).map(|s| s.to_string()),
        );
        push("page", Some(self.page).filter(|p| *p > 0).map(|p| p.to_string()));
        push(
            "per_page",
            Some(self.per_page).filter(|p| *p > 0).map(|p| p.to_string()),
        );
        push("sort", self.sort.map(|s| s.field.as_str().to_string()));
        push("order", self.sort.map(|s| s.order.as_str().to_string()));

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParkingKind, WifiTier};
    use crate::state::{FilterChange, ParkingFilter};

    fn keys(params: &ListParams) -> Vec<&'static str> {
        params.query_pairs().into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_default_params_only_paginate() {
        let params = ListParams::new(30);
        assert_eq!(
            params.query_pairs(),
            vec![("page", "1".to_string()), ("per_page", "30".to_string())]
        );
    }

    #[test]
    fn test_empty_price_is_omitted() {
        let mut params = ListParams::new(30);
        params.filters = params
            .filters
            .merged([FilterChange::parse("price_range_min", "").unwrap()]);
        assert!(!keys(&params).contains(&"price_range_min"));
    }

    #[test]
    fn test_full_query_order() {
        let mut params = ListParams::new(10);
        params.page = 3;
        params.sort = Some(Sort::new(SortField::ReviewCount, SortOrder::Asc));
        params.filters = params.filters.merged([
            FilterChange::City(Some("Tampa".into())),
            FilterChange::Name(Some("pizza".into())),
            FilterChange::Wifi(Some(WifiTier::Paid)),
            FilterChange::Delivery(Some(true)),
            FilterChange::Parking(Some(ParkingFilter::default().with(ParkingKind::Lot, true))),
            FilterChange::MinStars(Some(4)),
        ]);

        assert_eq!(
            params.query_pairs(),
            vec![
                ("name", "pizza".to_string()),
                ("city", "Tampa".to_string()),
                ("wifi", "paid".to_string()),
                ("delivery", "true".to_string()),
                ("parking", r#"{"lot":true}"#.to_string()),
                ("minStars", "4".to_string()),
                ("page", "3".to_string()),
                ("per_page", "10".to_string()),
                ("sort", "review_count".to_string()),
                ("order", "asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_false_flags_are_sent() {
        let mut params = ListParams::new(30);
        params.filters = params
            .filters
            .merged([FilterChange::PetsAllowed(Some(false))]);
        assert!(params
            .query_pairs()
            .contains(&("pets_allowed", "false".to_string())));
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(
            Sort::parse("stars", None).unwrap(),
            Sort::new(SortField::Stars, SortOrder::Desc)
        );
        assert!(Sort::parse("stars", Some("sideways")).is_err());
        assert!(Sort::parse("distance", None).is_err());
    }
}
