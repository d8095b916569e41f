//! TokenSwap Pricing
//!
//! Loads raw price quotes from a feed and condenses them into a catalog that
//! holds exactly one, the latest, quote per currency.
//!
//! # Features
//!
//! - Pluggable price feeds (HTTP, file, in-memory)
//! - Deterministic deduplication of stale and duplicate quotes
//! - A catalog service that keeps the last good catalog when a refresh fails
//! - Exchange ratio derivation between two catalogued currencies
//!
//! # Example
//!
//! ```rust,ignore
//! use tokenswap_pricing::{Catalog, HttpPriceFeed, PricingConfig};
//!
//! let feed = HttpPriceFeed::new(&PricingConfig::from_env())?;
//! let catalog = Catalog::load(&feed).await?;
//!
//! let ratio = tokenswap_pricing::exchange_ratio(Some(&catalog), Some(&usd), Some(&eth));
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod feed;
pub mod ratio;
pub mod service;

pub use catalog::{Catalog, LoadReport};
pub use config::PricingConfig;
pub use error::{FetchError, FetchResult};
pub use feed::{FilePriceFeed, HttpPriceFeed, PriceFeed, StaticPriceFeed};
pub use ratio::exchange_ratio;
pub use service::CatalogService;
