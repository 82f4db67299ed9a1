use crate::models::RiskProfile;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the risk-scoring API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Risk-scoring API client
///
/// Handles all communication with the remote screening service:
/// - Registering an address for screening
/// - Retrieving the computed risk profile
/// - Fetching the category catalog that shapes the report
pub struct ApiClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl ApiClient {
    /// Create a new API client with a per-request timeout
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Submit an address for screening (idempotent upsert on the remote side)
    ///
    /// Must complete before retrieval is attempted for that address.
    pub async fn register(&self, address: &str) -> Result<(), ApiError> {
        let url = self.endpoint("entities");

        tracing::debug!("Registering address {} for screening", address);

        let response = self
            .client
            .post(&url)
            .header("Token", &self.api_key)
            .json(&json!({ "address": address }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(())
    }

    /// Retrieve the computed risk profile for a registered address
    pub async fn retrieve(&self, address: &str) -> Result<RiskProfile, ApiError> {
        let url = self.endpoint(&format!("entities/{}", urlencoding::encode(address)));

        tracing::debug!("Retrieving risk profile for {}", address);

        let response = self
            .client
            .get(&url)
            .header("Token", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let json: Value = response.json().await?;

        serde_json::from_value(json)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Fetch the category taxonomy, sorted lexicographically
    ///
    /// Runs once at startup; the whole run is shaped against this snapshot,
    /// so any failure here is fatal to the caller.
    pub async fn resolve_categories(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint("categories");

        tracing::debug!("Fetching category catalog from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Token", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let json: Value = response.json().await?;

        let categories = json
            .get("categories")
            .and_then(|c| c.as_array())
            .ok_or_else(|| ApiError::InvalidResponse("Missing categories array".into()))?;

        let mut labels: Vec<String> = categories
            .iter()
            .filter_map(|c| match c {
                Value::String(s) => Some(s.clone()),
                // Some deployments wrap each label in an object
                Value::Object(o) => o.get("category").and_then(|v| v.as_str()).map(String::from),
                _ => None,
            })
            .collect();

        labels.sort();

        tracing::debug!("Resolved {} categories", labels.len());

        Ok(labels)
    }
}
