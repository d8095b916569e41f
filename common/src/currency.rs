//! Currency symbols.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A token or currency symbol as published by the price feed.
///
/// Symbols are compared exactly: `"bNEO"` and `"BNEO"` are different
/// currencies. No case folding or trimming is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Create a currency from its symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Get the symbol.
    pub fn symbol(&self) -> &str {
        &self.0
    }

    /// Location of the currency's icon under an icon repository base URL.
    pub fn icon_url(&self, base_url: &str) -> String {
        format!("{}/{}.svg", base_url.trim_end_matches('/'), self.0)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_are_case_sensitive() {
        assert_ne!(Currency::new("bNEO"), Currency::new("BNEO"));
        assert_eq!(Currency::from("USD"), Currency::new("USD".to_string()));
    }

    #[test]
    fn test_icon_url() {
        let usd = Currency::new("USD");
        assert_eq!(usd.icon_url("https://icons.local/tokens"), "https://icons.local/tokens/USD.svg");
        assert_eq!(usd.icon_url("https://icons.local/tokens/"), "https://icons.local/tokens/USD.svg");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Currency::new("ETH")).unwrap();
        assert_eq!(json, "\"ETH\"");
        let parsed: Currency = serde_json::from_str("\"wstETH\"").unwrap();
        assert_eq!(parsed.symbol(), "wstETH");
    }
}
