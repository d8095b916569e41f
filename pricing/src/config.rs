//! Price feed configuration.

use std::time::Duration;

use tokenswap_common::{constants, DurationExt};

/// Configuration for loading prices.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// URL of the JSON price feed.
    pub price_url: Option<String>,
    /// Request timeout for the feed.
    pub request_timeout: Duration,
    /// Base URL of the currency icon repository.
    pub icon_base_url: Option<String>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            price_url: None,
            request_timeout: constants::feed_request_timeout().as_std(),
            icon_base_url: None,
        }
    }
}

impl PricingConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("TOKEN_PRICE_URL") {
            config.price_url = Some(url);
        }

        if let Ok(timeout) = std::env::var("TOKEN_PRICE_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                config.request_timeout = Duration::from_millis(ms);
            }
        }

        if let Ok(url) = std::env::var("TOKEN_ICON_URL") {
            config.icon_base_url = Some(url);
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(url) = &self.price_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("Price feed URL must be http(s): {}", url));
            }
        }

        if self.request_timeout.is_zero() {
            return Err("Price feed timeout cannot be zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PricingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_config() {
        let mut config = PricingConfig::default();
        config.price_url = Some("ftp://prices.local/feed.json".to_string());
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
