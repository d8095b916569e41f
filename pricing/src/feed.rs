//! Price feed trait and implementations.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use tokenswap_common::PriceRecord;
use tracing::{debug, instrument};

use crate::config::PricingConfig;
use crate::error::{FetchError, FetchResult};

/// Source of raw price records.
///
/// A feed returns the complete list it currently publishes, in publication
/// order, duplicates and stale quotes included.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Get the feed name.
    fn name(&self) -> &str;

    /// Fetch every record the feed currently publishes.
    async fn fetch(&self) -> FetchResult<Vec<PriceRecord>>;
}

/// Decode a JSON array of price records.
pub fn decode_records(bytes: &[u8]) -> FetchResult<Vec<PriceRecord>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Price feed served as a JSON document over HTTP.
pub struct HttpPriceFeed {
    url: String,
    client: Client,
}

impl HttpPriceFeed {
    /// Create a feed from configuration.
    pub fn new(config: &PricingConfig) -> FetchResult<Self> {
        let url = config
            .price_url
            .clone()
            .ok_or_else(|| FetchError::NotConfigured("TOKEN_PRICE_URL is not set".to_string()))?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { url, client })
    }

    /// Get the feed URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PriceFeed for HttpPriceFeed {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> FetchResult<Vec<PriceRecord>> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        let records = decode_records(&body)?;

        debug!(records = records.len(), "Fetched price feed");
        Ok(records)
    }
}

/// Price feed read from a JSON file on disk.
pub struct FilePriceFeed {
    path: PathBuf,
}

impl FilePriceFeed {
    /// Create a feed reading the given file on every fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PriceFeed for FilePriceFeed {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> FetchResult<Vec<PriceRecord>> {
        let bytes = tokio::fs::read(&self.path).await?;
        let records = decode_records(&bytes)?;

        debug!(path = %self.path.display(), records = records.len(), "Read price feed");
        Ok(records)
    }
}

/// Price feed over a fixed, in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceFeed {
    records: Vec<PriceRecord>,
}

impl StaticPriceFeed {
    /// Create a feed that always publishes `records`.
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    /// Create a feed from a JSON document.
    pub fn from_json(json: &str) -> FetchResult<Self> {
        Ok(Self::new(decode_records(json.as_bytes())?))
    }
}

#[async_trait]
impl PriceFeed for StaticPriceFeed {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> FetchResult<Vec<PriceRecord>> {
        Ok(self.records.clone())
    }
}

/// Feed returning a scripted sequence of responses, for tests.
#[cfg(any(test, feature = "test-utils"))]
pub struct ScriptedPriceFeed {
    responses: parking_lot::Mutex<std::collections::VecDeque<FetchResult<Vec<PriceRecord>>>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl ScriptedPriceFeed {
    /// Create an empty script.
    pub fn new() -> Self {
        Self {
            responses: parking_lot::Mutex::new(std::collections::VecDeque::new()),
        }
    }

    /// Queue a successful response.
    pub fn push_records(&self, records: Vec<PriceRecord>) {
        self.responses.lock().push_back(Ok(records));
    }

    /// Queue a failure.
    pub fn push_error(&self, error: FetchError) {
        self.responses.lock().push_back(Err(error));
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Default for ScriptedPriceFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl PriceFeed for ScriptedPriceFeed {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self) -> FetchResult<Vec<PriceRecord>> {
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("script exhausted".to_string())))
    }
}
