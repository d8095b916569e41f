//! Built-in price feed used when no feed is configured.

/// A small feed snapshot, with a stale USDC quote and two BUSD quotes that
/// share a timestamp.
pub const SAMPLE_FEED: &str = r#"[
  {"currency":"USD","date":"2023-08-29T07:10:30.000Z","price":1},
  {"currency":"USDC","date":"2023-08-29T07:10:30.000Z","price":0.99},
  {"currency":"ETH","date":"2023-08-29T07:10:52.000Z","price":1645.93},
  {"currency":"ATOM","date":"2023-08-29T07:10:50.000Z","price":7.18},
  {"currency":"OSMO","date":"2023-08-29T07:10:50.000Z","price":0.38},
  {"currency":"WBTC","date":"2023-08-29T07:10:52.000Z","price":26002.82},
  {"currency":"BUSD","date":"2023-08-29T07:10:40.000Z","price":1},
  {"currency":"BUSD","date":"2023-08-29T07:10:40.000Z","price":0.999},
  {"currency":"USDC","date":"2023-08-29T07:10:40.000Z","price":1},
  {"currency":"bNEO","date":"2023-08-29T07:10:50.000Z","price":7.1}
]"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tokenswap_common::Currency;
    use tokenswap_pricing::{Catalog, StaticPriceFeed};

    #[test]
    fn test_sample_feed_loads() {
        let feed = StaticPriceFeed::from_json(SAMPLE_FEED).unwrap();
        let catalog = tokio_test::block_on(Catalog::load(&feed)).unwrap();

        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.report().duplicates_dropped, 2);
        assert_eq!(catalog.lookup(&Currency::new("USDC")).unwrap().price, Decimal::ONE);
        assert_eq!(catalog.lookup(&Currency::new("BUSD")).unwrap().price, Decimal::ONE);
    }
}
