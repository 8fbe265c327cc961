//! Owner of the current list parameters.

use super::filters::{FilterChange, FilterState};
use super::params::{ListParams, Sort};
use crate::models::ParkingKind;

/// Holds the current filter/sort/pagination selection and the page count
/// reported by the last applied response.
#[derive(Debug, Clone)]
pub struct FilterStore {
    params: ListParams,
    total_pages: u32,
}

impl FilterStore {
    pub fn new(per_page: u32) -> Self {
        Self {
            params: ListParams::new(per_page),
            total_pages: 0,
        }
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    pub fn filters(&self) -> &FilterState {
        &self.params.filters
    }

    pub fn page(&self) -> u32 {
        self.params.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages;
    }

    /// Shallow-merge `changes` into the filters and go back to page 1.
    pub fn merge<I>(&mut self, changes: I) -> &ListParams
    where
        I: IntoIterator<Item = FilterChange>,
    {
        let filters = self.params.filters.merged(changes);
        self.params = ListParams {
            filters,
            page: 1,
            ..self.params.clone()
        };
        &self.params
    }

    /// Flip one parking kind, passing the whole updated sub-object through [`merge`](Self::merge).
    pub fn toggle_parking(&mut self, kind: ParkingKind) -> &ListParams {
        let parking = self.params.filters.parking_or_default().toggled(kind);
        self.merge([FilterChange::Parking(Some(parking))])
    }

    /// Change the ordering; counts as a filter change, so the page resets.
    pub fn set_sort(&mut self, sort: Option<Sort>) -> &ListParams {
        self.params = ListParams {
            sort,
            page: 1,
            ..self.params.clone()
        };
        &self.params
    }

    /// Reset to the default selection (no filters, no sort, page 1).
    pub fn clear(&mut self) -> &ListParams {
        self.params = ListParams::new(self.params.per_page);
        &self.params
    }

    /// Jump to `page` without touching the filters. Returns whether the page changed.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if page == self.params.page {
            return false;
        }
        self.params.page = page;
        true
    }

    pub fn has_next_page(&self) -> bool {
        self.params.page < self.total_pages
    }

    pub fn has_prev_page(&self) -> bool {
        self.params.page > 1
    }

    /// Advance one page, clamped to the known page count.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        self.set_page(self.params.page + 1)
    }

    /// Go back one page, never below 1.
    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev_page() {
            return false;
        }
        self.set_page(self.params.page - 1)
    }

    pub fn active_filter_count(&self) -> usize {
        self.params.filters.active_count()
    }
}
