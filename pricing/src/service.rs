//! Catalog ownership across refreshes.

use std::sync::Arc;

use parking_lot::RwLock;
use tokenswap_common::{now, Timestamp};
use tracing::{info, instrument, warn};

use crate::catalog::Catalog;
use crate::error::FetchResult;
use crate::feed::PriceFeed;

/// Holds the most recent successfully loaded catalog.
///
/// A failed refresh leaves the previous catalog in place. Overlapping
/// refreshes are not coalesced: whichever completes last is kept.
pub struct CatalogService {
    feed: Arc<dyn PriceFeed>,
    current: RwLock<Option<Arc<Catalog>>>,
    loaded_at: RwLock<Option<Timestamp>>,
}

impl CatalogService {
    /// Create a service with no catalog loaded yet.
    pub fn new(feed: Arc<dyn PriceFeed>) -> Self {
        Self {
            feed,
            current: RwLock::new(None),
            loaded_at: RwLock::new(None),
        }
    }

    /// Load a fresh catalog and make it current.
    #[instrument(skip(self), fields(feed = self.feed.name()))]
    pub async fn refresh(&self) -> FetchResult<Arc<Catalog>> {
        match Catalog::load(self.feed.as_ref()).await {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                *self.current.write() = Some(catalog.clone());
                *self.loaded_at.write() = Some(now());
                info!(currencies = catalog.len(), "Catalog replaced");
                Ok(catalog)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    retryable = e.is_retryable(),
                    stale = self.current.read().is_some(),
                    "Catalog refresh failed, keeping previous catalog"
                );
                Err(e)
            }
        }
    }

    /// Get the current catalog, if one was ever loaded.
    pub fn current(&self) -> Option<Arc<Catalog>> {
        self.current.read().clone()
    }

    /// When the current catalog was loaded.
    pub fn loaded_at(&self) -> Option<Timestamp> {
        *self.loaded_at.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::feed::ScriptedPriceFeed;
    use rust_decimal_macros::dec;
    use tokenswap_common::{Currency, PriceRecord};

    #[tokio::test]
    async fn test_refresh_replaces_catalog() {
        let feed = Arc::new(ScriptedPriceFeed::new());
        feed.push_records(vec![PriceRecord::new("USD", dec!(1), now())]);
        feed.push_records(vec![PriceRecord::new("ETH", dec!(1645.93), now())]);

        let service = CatalogService::new(feed);
        assert!(service.current().is_none());

        service.refresh().await.unwrap();
        assert!(service.current().unwrap().contains(&Currency::new("USD")));

        service.refresh().await.unwrap();
        let current = service.current().unwrap();
        assert!(current.contains(&Currency::new("ETH")));
        assert!(!current.contains(&Currency::new("USD")));
        assert!(service.loaded_at().is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_catalog() {
        let feed = Arc::new(ScriptedPriceFeed::new());
        feed.push_records(vec![PriceRecord::new("USD", dec!(1), now())]);
        feed.push_error(FetchError::Network("connection reset".to_string()));

        let service = CatalogService::new(feed);
        let first = service.refresh().await.unwrap();
        let loaded_at = service.loaded_at();

        let result = service.refresh().await;
        assert!(matches!(result, Err(FetchError::Network(_))));

        let current = service.current().unwrap();
        assert!(Arc::ptr_eq(&first, &current));
        assert_eq!(service.loaded_at(), loaded_at);
    }

    #[tokio::test]
    async fn test_failed_first_refresh_leaves_no_catalog() {
        let feed = Arc::new(ScriptedPriceFeed::new());
        feed.push_error(FetchError::Status { status: 500 });

        let service = CatalogService::new(feed);
        assert!(service.refresh().await.is_err());
        assert!(service.current().is_none());
    }
}
