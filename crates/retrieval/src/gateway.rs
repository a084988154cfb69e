//! Retrieval gateway.
//!
//! Wraps one search backend behind a uniform async contract and owns the
//! client lifecycle. `RetrievalGateway::search` is the single
//! error-containment point of the subsystem: its signature is infallible,
//! so validation and backend failures can only leave it as error-status
//! outcomes, never as raised errors.

use crate::filter::compile;
use crate::normalize::{normalize, NormalizedRecord, NormalizedValue};
use crate::types::{BackendId, RetrievalOutcome, SearchRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shopwise_core::{AppError, AppResult, Location, SettingsCache};
use std::sync::{Arc, OnceLock};

/// Async search contract one backend connection fulfills.
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    /// Issue one search call and return the raw document payloads.
    async fn search(
        &self,
        location: Location,
        serving_config: &str,
        query: &str,
        page_size: u32,
        filter: Option<&str>,
    ) -> AppResult<Vec<Value>>;
}

/// Search request wire format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchBody<'a> {
    query: &'a str,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
}

/// Search response wire format.
#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    document: Option<SearchDocument>,
}

#[derive(Debug, Deserialize)]
struct SearchDocument {
    #[serde(rename = "structData", default)]
    struct_data: Value,
}

/// HTTP connection to the Discovery Engine search service.
///
/// The underlying HTTP client is created lazily on first use and reused
/// for every subsequent call. Credential provisioning is external; when a
/// bearer token is supplied it is attached to each request.
pub struct DiscoveryBackend {
    /// Base URL override, used in tests; production resolves the host
    /// from the serving region
    base_url: Option<String>,

    /// Bearer token for the search service, when one is configured
    auth_token: Option<String>,

    /// Long-lived HTTP client handle
    client: OnceLock<reqwest::Client>,
}

impl DiscoveryBackend {
    pub fn new() -> Self {
        Self {
            base_url: None,
            auth_token: None,
            client: OnceLock::new(),
        }
    }

    /// Point the backend at a fixed base URL instead of the regional host.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            auth_token: None,
            client: OnceLock::new(),
        }
    }

    /// Attach a bearer token to every request.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn http(&self) -> &reqwest::Client {
        self.client.get_or_init(reqwest::Client::new)
    }

    /// Resolve the API host for a serving region. The global region uses
    /// the bare host; regional datastores use a region-prefixed one.
    fn endpoint(&self, location: Location) -> String {
        if let Some(base) = &self.base_url {
            return base.clone();
        }
        match location {
            Location::Global => "https://discoveryengine.googleapis.com".to_string(),
            other => format!("https://{}-discoveryengine.googleapis.com", other.as_str()),
        }
    }
}

impl Default for DiscoveryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SearchBackend for DiscoveryBackend {
    async fn search(
        &self,
        location: Location,
        serving_config: &str,
        query: &str,
        page_size: u32,
        filter: Option<&str>,
    ) -> AppResult<Vec<Value>> {
        let url = format!("{}/v1/{}:search", self.endpoint(location), serving_config);
        let body = SearchBody {
            query,
            page_size,
            filter,
        };

        tracing::debug!("Search call to {} (filter: {:?})", url, filter);

        let mut request = self.http().post(&url).json(&body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to reach search service: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Backend(format!(
                "Search service error ({}): {}",
                status, error_text
            )));
        }

        let parsed: SearchResponseBody = response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to parse search response: {}", e)))?;

        Ok(parsed
            .results
            .into_iter()
            .filter_map(|r| r.document.map(|d| d.struct_data))
            .collect())
    }
}

/// Gateway over one search backend connection.
pub struct RetrievalGateway {
    settings: Arc<SettingsCache>,
    backend: Arc<dyn SearchBackend>,
}

impl RetrievalGateway {
    pub fn new(settings: Arc<SettingsCache>, backend: Arc<dyn SearchBackend>) -> Self {
        Self { settings, backend }
    }

    /// Gateway backed by the Discovery Engine connection.
    pub fn discovery(settings: Arc<SettingsCache>) -> Self {
        Self::new(settings, Arc::new(DiscoveryBackend::new()))
    }

    /// Execute one search request against its target datastore.
    ///
    /// Never fails: every validation or backend error is converted into
    /// an error-status outcome here.
    pub async fn search(&self, request: SearchRequest) -> RetrievalOutcome {
        match self.try_search(&request).await {
            Ok((datastore_id, records)) => {
                tracing::info!(
                    "Search against {} returned {} records",
                    datastore_id,
                    records.len()
                );
                RetrievalOutcome::success(datastore_id, records)
            }
            Err(e) => {
                tracing::warn!("Search failed: {}", e);
                RetrievalOutcome::failure(e)
            }
        }
    }

    async fn try_search(
        &self,
        request: &SearchRequest,
    ) -> AppResult<(String, Vec<NormalizedRecord>)> {
        if request.query.trim().is_empty() {
            return Err(AppError::Validation(
                "Query must be a non-empty string.".to_string(),
            ));
        }
        if request.max_results == 0 {
            return Err(AppError::Validation(
                "max_results must be a positive integer.".to_string(),
            ));
        }

        let cfg = self.settings.current();
        let project_id = cfg.require_project()?.to_string();
        // Unsupported regions are rejected when configuration is parsed;
        // by this point the location is one of the allowed set.
        let location = cfg.location;

        let datastore_id = match request.backend {
            BackendId::Item => cfg.item_datastore_id.clone().ok_or_else(|| {
                AppError::Validation(
                    "Missing required environment variable: ITEM_DATA_STORE_ID".to_string(),
                )
            })?,
            BackendId::Review => cfg.review_datastore_id.clone().ok_or_else(|| {
                AppError::Validation(
                    "Missing required environment variable: REVIEW_DATA_STORE_ID".to_string(),
                )
            })?,
        };

        // Datastore-scoped serving config (no blending)
        let serving_config = format!(
            "projects/{}/locations/{}/collections/default_collection/dataStores/{}/servingConfigs/default_serving_config",
            project_id, location, datastore_id
        );

        let filter = compile(&request.constraints);

        let documents = self
            .backend
            .search(
                location,
                &serving_config,
                &request.query,
                request.max_results,
                filter.as_deref(),
            )
            .await?;

        let records = documents
            .iter()
            .map(|doc| match normalize(doc) {
                NormalizedValue::Record(map) => Ok(map),
                _ => Err(AppError::Backend(
                    "Document payload was not a structured record".to_string(),
                )),
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok((datastore_id, records))
    }
}
