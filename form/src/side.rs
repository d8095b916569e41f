//! The two halves of a swap form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokenswap_common::{normalize_amount, parse_amount, Currency, ZERO_AMOUNT};

/// Which half of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Currency being given.
    From,
    /// Currency being received.
    To,
}

impl Side {
    /// The opposite side.
    pub fn other(&self) -> Side {
        match self {
            Side::From => Side::To,
            Side::To => Side::From,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::From => write!(f, "from"),
            Side::To => write!(f, "to"),
        }
    }
}

/// Selected currency and amount text for one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapSide {
    /// Selected currency, if any.
    pub currency: Option<Currency>,
    /// Normalized amount text.
    amount: String,
}

impl SwapSide {
    /// An empty side: no currency, amount `"0"`.
    pub fn new() -> Self {
        Self {
            currency: None,
            amount: ZERO_AMOUNT.to_string(),
        }
    }

    /// Get the amount text.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Store raw user input, normalized.
    pub fn set_amount(&mut self, raw: &str) {
        self.amount = normalize_amount(raw);
    }

    /// Store a computed amount as-is.
    pub(crate) fn set_derived_amount(&mut self, amount: String) {
        self.amount = amount;
    }

    /// Reset the amount to `"0"`.
    pub fn reset_amount(&mut self) {
        self.amount = ZERO_AMOUNT.to_string();
    }

    /// Numeric value of the amount; zero when unparseable.
    pub fn amount_value(&self) -> Decimal {
        parse_amount(&self.amount).unwrap_or(Decimal::ZERO)
    }

    /// Check if the amount is numerically zero.
    pub fn is_zero(&self) -> bool {
        self.amount_value().is_zero()
    }

    /// Check if a currency is selected.
    pub fn has_currency(&self) -> bool {
        self.currency.is_some()
    }
}

impl Default for SwapSide {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_side() {
        let side = SwapSide::new();
        assert_eq!(side.amount(), "0");
        assert!(side.is_zero());
        assert!(!side.has_currency());
    }

    #[test]
    fn test_set_amount_normalizes() {
        let mut side = SwapSide::new();

        side.set_amount("007");
        assert_eq!(side.amount(), "7");
        assert_eq!(side.amount_value(), dec!(7));

        side.set_amount("");
        assert_eq!(side.amount(), "0");

        side.set_amount("0.000");
        assert_eq!(side.amount(), "0.000");
        assert!(side.is_zero());
    }

    #[test]
    fn test_other_side() {
        assert_eq!(Side::From.other(), Side::To);
        assert_eq!(Side::To.other(), Side::From);
        assert_eq!(Side::From.to_string(), "from");
    }
}
