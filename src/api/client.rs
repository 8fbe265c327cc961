//! HTTP client for the restaurant directory REST API.

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::errors::{AppError, Operation};
use crate::models::{
    Acknowledgement, FilterOptions, RawRestaurantPage, RestaurantId, RestaurantPage,
    RestaurantPayload,
};
use crate::state::ListParams;

/// API client for the `/api` endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a new API client from configuration.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Url::parse(&config.api_url)
            .map_err(|e| AppError::Config(format!("invalid API URL {:?}: {}", config.api_url, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// URL of a single restaurant; the id is percent-encoded as one path segment.
    fn record_url(&self, operation: Operation, id: &RestaurantId) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.endpoint("restaurants"))
            .map_err(|e| AppError::request(operation, e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| AppError::request(operation, "base URL cannot carry a path"))?
            .push(id.as_str());
        Ok(url)
    }

    /// GET /api/restaurants - One page of restaurants matching `params`.
    pub async fn list(&self, params: &ListParams) -> Result<RestaurantPage, AppError> {
        let pairs = params.query_pairs();
        tracing::debug!(query = ?pairs, "listing restaurants");

        let request = self.client.get(self.endpoint("restaurants")).query(&pairs);
        let raw: RawRestaurantPage = self.send(Operation::FetchRestaurants, request).await?;
        Ok(RestaurantPage::from(raw))
    }

    /// POST /api/restaurants - Create a restaurant.
    pub async fn create(&self, record: &RestaurantPayload) -> Result<Acknowledgement, AppError> {
        tracing::debug!(name = %record.name, "creating restaurant");
        let request = self.client.post(self.endpoint("restaurants")).json(record);
        self.send(Operation::CreateRestaurant, request).await
    }

    /// PUT /api/restaurants/{id} - Replace a restaurant's editable fields.
    pub async fn update(
        &self,
        id: &RestaurantId,
        record: &RestaurantPayload,
    ) -> Result<Acknowledgement, AppError> {
        tracing::debug!(%id, "updating restaurant");
        let url = self.record_url(Operation::UpdateRestaurant, id)?;
        let request = self.client.put(url).json(record);
        self.send(Operation::UpdateRestaurant, request).await
    }

    /// DELETE /api/restaurants/{id} - Delete a restaurant.
    pub async fn delete(&self, id: &RestaurantId) -> Result<Acknowledgement, AppError> {
        tracing::debug!(%id, "deleting restaurant");
        let url = self.record_url(Operation::DeleteRestaurant, id)?;
        let request = self.client.delete(url);
        self.send(Operation::DeleteRestaurant, request).await
    }

    /// GET /api/categories - Distinct category names.
    pub async fn list_categories(&self) -> Result<Vec<String>, AppError> {
        let request = self.client.get(self.endpoint("categories"));
        self.send(Operation::FetchCategories, request).await
    }

    /// GET /api/filters - Filter-option catalog.
    pub async fn filter_options(&self) -> Result<FilterOptions, AppError> {
        let request = self.client.get(self.endpoint("filters"));
        self.send(Operation::FetchFilterOptions, request).await
    }

    /// Send `request`, collapsing every failure into the generic error for `operation`.
    async fn send<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, AppError> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::request(operation, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::request(
                operation,
                format!("HTTP {}: {}", status, body),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::request(operation, format!("invalid response body: {}", e)))
    }
}
