//! Swap form configuration.

use std::time::Duration;

use tokenswap_common::{constants, DurationExt};

/// Configuration for the swap form engine.
#[derive(Debug, Clone)]
pub struct SwapConfig {
    /// Delay before a recomputed amount counts as settled.
    pub settle_delay: Duration,
    /// Decimal places of derived amounts and the quoted ratio.
    pub decimal_places: u32,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            settle_delay: constants::settle_delay().as_std(),
            decimal_places: 6,
        }
    }
}

impl SwapConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(delay) = std::env::var("SWAP_SETTLE_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                config.settle_delay = Duration::from_millis(ms);
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        // rust_decimal carries at most 28 fractional digits
        if self.decimal_places > 28 {
            return Err(format!(
                "Decimal places {} exceeds the supported maximum of 28",
                self.decimal_places
            ));
        }

        Ok(())
    }
}
