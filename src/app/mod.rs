//! Directory view-model.
//!
//! [`DirectoryApp`] owns the filter state, the current page of records, the
//! open dialogs and the error notification. Every change to the filter state
//! or the page number re-fetches the list; mutations go through the backend
//! and are followed by a full re-fetch, never a local edit.

use std::time::Instant;

use crate::api::ApiClient;
use crate::config::Config;
use crate::dialog::{Dialog, Notifier};
use crate::errors::AppError;
use crate::form::FormEditor;
use crate::models::{FilterOptions, ParkingKind, Restaurant, RestaurantId, RestaurantPage};
use crate::state::{
    FilterChange, FilterState, FilterStore, ListParams, RequestSequence, RequestTicket, Sort,
};
use crate::view::{dispatch, CardAction, CardTarget};

/// A list request that has been issued but not yet applied.
#[derive(Debug, Clone)]
pub struct PendingList {
    pub ticket: RequestTicket,
    pub params: ListParams,
}

/// State behind the directory screen.
pub struct DirectoryApp {
    api: ApiClient,
    store: FilterStore,
    sequence: RequestSequence,
    restaurants: Vec<Restaurant>,
    loading: bool,
    search_input: String,
    filter_options: Option<FilterOptions>,
    categories: Vec<String>,
    form: Dialog<FormEditor>,
    detail: Dialog<Restaurant>,
    delete_confirm: Dialog<Restaurant>,
    notifier: Notifier,
}

impl DirectoryApp {
    pub fn new(api: ApiClient, config: &Config) -> Self {
        Self {
            api,
            store: FilterStore::new(config.per_page),
            sequence: RequestSequence::new(),
            restaurants: Vec::new(),
            loading: false,
            search_input: String::new(),
            filter_options: None,
            categories: Vec::new(),
            form: Dialog::Closed,
            detail: Dialog::Closed,
            delete_confirm: Dialog::Closed,
            notifier: Notifier::new(config.toast_duration),
        }
    }

    // ==================== ACCESSORS ====================

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn params(&self) -> &ListParams {
        self.store.params()
    }

    pub fn filters(&self) -> &FilterState {
        self.store.filters()
    }

    pub fn page(&self) -> u32 {
        self.store.page()
    }

    pub fn total_pages(&self) -> u32 {
        self.store.total_pages()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn active_filter_count(&self) -> usize {
        self.store.active_filter_count()
    }

    pub fn filter_options(&self) -> Option<&FilterOptions> {
        self.filter_options.as_ref()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn form(&self) -> Option<&FormEditor> {
        self.form.content()
    }

    pub fn detail(&self) -> Option<&Restaurant> {
        self.detail.content()
    }

    pub fn delete_target(&self) -> Option<&Restaurant> {
        self.delete_confirm.content()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.notifier.message()
    }

    // ==================== LIST LOADING ====================

    /// Issue a list request for the current parameters.
    pub fn begin_refresh(&mut self) -> PendingList {
        self.loading = true;
        PendingList {
            ticket: self.sequence.issue(),
            params: self.store.params().clone(),
        }
    }

    /// Apply a list response. Responses to superseded requests are dropped;
    /// returns whether `result` was applied.
    pub fn finish_refresh(
        &mut self,
        pending: PendingList,
        result: Result<RestaurantPage, AppError>,
    ) -> bool {
        if !self.sequence.is_current(pending.ticket) {
            tracing::debug!(
                ticket = pending.ticket.value(),
                "discarding superseded list response"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                tracing::debug!(
                    count = page.restaurants.len(),
                    total_pages = page.total_pages,
                    "list loaded"
                );
                self.restaurants = page.restaurants;
                self.store.set_total_pages(page.total_pages);
            }
            Err(e) => self.report(e),
        }
        true
    }

    /// Fetch the current page.
    pub async fn refresh(&mut self) -> bool {
        let pending = self.begin_refresh();
        let result = self.api.list(&pending.params).await;
        self.finish_refresh(pending, result)
    }

    // ==================== FILTERS & PAGINATION ====================

    /// Merge `changes` into the filters (back to page 1) and re-fetch.
    pub async fn apply_filters<I>(&mut self, changes: I)
    where
        I: IntoIterator<Item = FilterChange>,
    {
        self.store.merge(changes);
        self.refresh().await;
    }

    /// Parse and apply one `key=value` filter entered by the user.
    pub async fn apply_filter_input(&mut self, key: &str, value: &str) {
        match FilterChange::parse(key, value) {
            Ok(change) => self.apply_filters([change]).await,
            Err(e) => self.report(e),
        }
    }

    pub async fn toggle_parking(&mut self, kind: ParkingKind) {
        self.store.toggle_parking(kind);
        self.refresh().await;
    }

    /// Search by name.
    pub async fn search(&mut self, name: &str) {
        self.search_input = name.to_string();
        self.apply_filters([FilterChange::Name(Some(name.to_string()))])
            .await;
    }

    pub async fn clear_filters(&mut self) {
        self.search_input.clear();
        self.store.clear();
        self.refresh().await;
    }

    pub async fn set_sort(&mut self, sort: Option<Sort>) {
        self.store.set_sort(sort);
        self.refresh().await;
    }

    pub async fn set_page(&mut self, page: u32) {
        if self.store.set_page(page) {
            self.refresh().await;
        }
    }

    pub async fn next_page(&mut self) {
        if self.store.next_page() {
            self.refresh().await;
        }
    }

    pub async fn prev_page(&mut self) {
        if self.store.prev_page() {
            self.refresh().await;
        }
    }

    // ==================== CATALOGS ====================

    pub async fn load_filter_options(&mut self) {
        match self.api.filter_options().await {
            Ok(options) => self.filter_options = Some(options),
            Err(e) => self.report(e),
        }
    }

    pub async fn load_categories(&mut self) {
        match self.api.list_categories().await {
            Ok(categories) => self.categories = categories,
            Err(e) => self.report(e),
        }
    }

    // ==================== CARD ACTIONS ====================

    /// Restaurant shown at 1-based `position` on the current page.
    pub fn restaurant_at(&self, position: usize) -> Result<&Restaurant, AppError> {
        position
            .checked_sub(1)
            .and_then(|i| self.restaurants.get(i))
            .ok_or_else(|| AppError::NotFound(format!("No restaurant at position {}", position)))
    }

    fn find(&self, id: &RestaurantId) -> Result<&Restaurant, AppError> {
        self.restaurants
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Restaurant {} is not on this page", id)))
    }

    /// Handle a click on the card at `position`.
    pub fn click_card(&mut self, position: usize, target: CardTarget) {
        let action = match self.restaurant_at(position) {
            Ok(restaurant) => dispatch(restaurant, target),
            Err(e) => return self.report(e),
        };
        match action {
            CardAction::View(id) => self.open_view(&id),
            CardAction::Edit(id) => self.open_edit(&id),
            CardAction::Delete(id) => self.request_delete(&id),
        }
    }

    pub fn open_view(&mut self, id: &RestaurantId) {
        match self.find(id).cloned() {
            Ok(restaurant) => self.detail.open(restaurant),
            Err(e) => self.report(e),
        }
    }

    pub fn close_view(&mut self) {
        self.detail.close();
    }

    // ==================== FORM ====================

    pub fn open_create(&mut self) {
        self.form.open(FormEditor::create());
    }

    pub fn open_edit(&mut self, id: &RestaurantId) {
        match self.find(id).map(FormEditor::edit) {
            Ok(editor) => self.form.open(editor),
            Err(e) => self.report(e),
        }
    }

    /// Mutable access to the open form for field edits.
    pub fn form_mut(&mut self) -> Option<&mut FormEditor> {
        self.form.content_mut()
    }

    /// Submit the open form. On success the form closes and the list is
    /// re-fetched; on failure the form stays open showing the error.
    pub async fn submit_form(&mut self) -> bool {
        let Some(editor) = self.form.content_mut() else {
            return false;
        };
        if editor.submit(&self.api).await.is_err() {
            return false;
        }
        self.form.close();
        self.refresh().await;
        true
    }

    pub fn cancel_form(&mut self) {
        self.form.close();
    }

    // ==================== DELETE ====================

    pub fn request_delete(&mut self, id: &RestaurantId) {
        match self.find(id).cloned() {
            Ok(restaurant) => self.delete_confirm.open(restaurant),
            Err(e) => self.report(e),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirm.close();
    }

    /// Delete the restaurant awaiting confirmation, then re-fetch once.
    /// On failure the confirmation stays open and the error is shown.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.delete_confirm.content().map(|r| r.id.clone()) else {
            return false;
        };

        match self.api.delete(&id).await {
            Ok(_) => {
                self.refresh().await;
                self.delete_confirm.close();
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    // ==================== NOTIFICATION ====================

    pub fn dismiss_error(&mut self) {
        self.notifier.dismiss();
    }

    /// Expire the notification once its display time has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notifier.tick(now)
    }

    /// Log `err` and show it in the error notification.
    pub fn report(&mut self, err: AppError) {
        tracing::error!(code = err.error_code(), "{}", err);
        self.notifier.show(err.user_message(), Instant::now());
    }
}
