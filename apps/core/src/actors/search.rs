use crate::actors::messages::{AppError, OrganicResult};
use crate::actors::traits::SearchProvider;
use crate::config::AppConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Longest response body echoed back in an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Shape of the SerpAPI JSON response we rely on.
#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Option<Vec<OrganicResult>>,
    #[serde(default)]
    error: Option<String>,
}

/// SerpAPI-backed Google search.
#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl SerpApiClient {
    /// Creates a client for `endpoint` with a per-request `timeout`.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Builds the client from configuration. Fails when no API key is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let api_key = config.require_serpapi_key()?;
        Self::new(config.search_endpoint.clone(), api_key, config.search_timeout())
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, num: usize) -> Result<Vec<OrganicResult>, AppError> {
        let num_param = num.to_string();
        let res = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", self.api_key.as_str()),
                ("num", num_param.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let excerpt: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(AppError::Enrichment(format!(
                "Search request failed with status {}: {}",
                status, excerpt
            )));
        }

        let parsed: SerpResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::Enrichment(format!("Malformed search response: {}", e))
        })?;

        if let Some(message) = parsed.error {
            warn!("Search provider reported an error: {}", message);
            return Err(AppError::Enrichment(format!("Search provider error: {}", message)));
        }

        let mut results = parsed.organic_results.unwrap_or_default();
        results.truncate(num);
        info!("Search returned {} organic results", results.len());
        Ok(results)
    }
}

/// Search backend selected from configuration.
///
/// Without an API key the backend is disabled and every search fails with the
/// configuration error, which surfaces as the enrichment error message.
pub enum SearchBackend {
    SerpApi(SerpApiClient),
    Disabled(AppError),
}

impl SearchBackend {
    pub fn from_config(config: &AppConfig) -> Self {
        match SerpApiClient::from_config(config) {
            Ok(client) => SearchBackend::SerpApi(client),
            Err(e) => {
                info!("Keyword analysis disabled: {}", e);
                SearchBackend::Disabled(e)
            }
        }
    }
}

#[async_trait]
impl SearchProvider for SearchBackend {
    async fn search(&self, query: &str, num: usize) -> Result<Vec<OrganicResult>, AppError> {
        match self {
            SearchBackend::SerpApi(client) => client.search(query, num).await,
            SearchBackend::Disabled(reason) => Err(reason.clone()),
        }
    }
}
