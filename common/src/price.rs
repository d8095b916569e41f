//! Raw price quotes as delivered by the price feed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::time::{feed_date, Timestamp};

/// One observed quote for a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Quoted currency.
    pub currency: Currency,
    /// Price in the feed's reference unit.
    pub price: Decimal,
    /// When the quote was observed.
    #[serde(with = "feed_date")]
    pub date: Timestamp,
}

impl PriceRecord {
    /// Create a new price record.
    pub fn new(currency: impl Into<Currency>, price: Decimal, date: Timestamp) -> Self {
        Self {
            currency: currency.into(),
            price,
            date,
        }
    }

    /// A quote is usable only with a strictly positive price.
    pub fn is_valid(&self) -> bool {
        self.price > Decimal::ZERO
    }

    /// Whether this quote was observed strictly after `other`.
    pub fn is_newer_than(&self, other: &PriceRecord) -> bool {
        self.date > other.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_timestamp;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decode_feed_record() {
        let json = r#"{"currency":"BLUR","date":"2023-08-29T07:10:40.000Z","price":0.20811525423728813}"#;
        let record: PriceRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.currency, Currency::new("BLUR"));
        assert!(record.is_valid());
        assert_eq!(record.date, parse_timestamp("2023-08-29T07:10:40Z").unwrap());
    }

    #[test]
    fn test_decode_epoch_millis_and_string_price() {
        let json = r#"{"currency":"USD","date":1693293040000,"price":"1"}"#;
        let record: PriceRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.price, dec!(1));
        assert_eq!(record.date.timestamp_millis(), 1_693_293_040_000);
    }

    #[test]
    fn test_decode_rejects_bad_date() {
        let json = r#"{"currency":"USD","date":"not a date","price":1}"#;
        assert!(serde_json::from_str::<PriceRecord>(json).is_err());
    }

    #[test]
    fn test_validity_and_ordering() {
        let t1 = parse_timestamp("2023-08-29T07:10:40Z").unwrap();
        let t2 = parse_timestamp("2023-08-29T07:10:41Z").unwrap();

        let older = PriceRecord::new("ETH", dec!(1645.93), t1);
        let newer = PriceRecord::new("ETH", dec!(1650.00), t2);
        let same = PriceRecord::new("ETH", dec!(1640.00), t1);

        assert!(newer.is_newer_than(&older));
        assert!(!older.is_newer_than(&newer));
        assert!(!same.is_newer_than(&older));

        assert!(!PriceRecord::new("ZERO", Decimal::ZERO, t1).is_valid());
        assert!(!PriceRecord::new("NEG", dec!(-1), t1).is_valid());
    }
}
