//! HTTP client for the card collection endpoint

use super::model::{CollectionRequest, CollectionResponse, Identifier};
use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

/// Abstraction over the collection lookup, enabling testability.
#[async_trait::async_trait]
pub trait CardLookup: Send + Sync {
    /// Resolve one batch of identifiers
    ///
    /// Implementations must return cards in the same order as the identifiers that
    /// resolved; the resolver pairs them with decklist entries by position.
    async fn lookup(&self, identifiers: &[Identifier]) -> Result<CollectionResponse>;
}

/// Build the HTTP client shared by lookups and image downloads
pub fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json;q=0.9,*/*;q=0.8"));

    reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(config.timeout)
        .build()
        .map_err(|e| Error::config("user_agent", format!("failed to create HTTP client: {e}")))
}

/// Production [`CardLookup`] that POSTs to the collection endpoint.
#[derive(Clone)]
pub struct ScryfallClient {
    client: reqwest::Client,
    api_url: String,
}

impl ScryfallClient {
    /// Create a client for the configured endpoint
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_client(build_http_client(config)?, &config.api_url))
    }

    /// Create a client reusing an existing HTTP client
    pub fn with_client(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl CardLookup for ScryfallClient {
    async fn lookup(&self, identifiers: &[Identifier]) -> Result<CollectionResponse> {
        tracing::debug!(url = %self.api_url, identifiers = identifiers.len(), "posting collection lookup");

        let response = self
            .client
            .post(&self.api_url)
            .json(&CollectionRequest { identifiers })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "collection lookup rejected");
            return Err(Error::HttpStatus {
                url: self.api_url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice::<CollectionResponse>(&body)?)
    }
}
