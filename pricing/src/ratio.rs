//! Exchange ratio between two catalogued currencies.

use rust_decimal::Decimal;
use tokenswap_common::Currency;
use tracing::debug;

use crate::catalog::Catalog;

/// Units of `to` obtained for one unit of `from`.
///
/// Equal to `price(from) / price(to)`. Returns zero when there is no catalog,
/// when either currency is unset or not catalogued, or when the division is
/// not representable. Never fails.
pub fn exchange_ratio(
    catalog: Option<&Catalog>,
    from: Option<&Currency>,
    to: Option<&Currency>,
) -> Decimal {
    let (Some(catalog), Some(from), Some(to)) = (catalog, from, to) else {
        return Decimal::ZERO;
    };

    let (Some(from_quote), Some(to_quote)) = (catalog.lookup(from), catalog.lookup(to)) else {
        debug!(from = %from, to = %to, "Currency missing from catalog");
        return Decimal::ZERO;
    };

    from_quote
        .price
        .checked_div(to_quote.price)
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tokenswap_common::{now, PriceRecord};

    fn catalog() -> Catalog {
        let ts = now();
        Catalog::from_records(vec![
            PriceRecord::new("USD", dec!(1), ts),
            PriceRecord::new("EUR", dec!(0.5), ts),
            PriceRecord::new("ETH", dec!(1645.93), ts),
        ])
    }

    #[test]
    fn test_ratio() {
        let catalog = catalog();
        let usd = Currency::new("USD");
        let eur = Currency::new("EUR");

        assert_eq!(exchange_ratio(Some(&catalog), Some(&usd), Some(&eur)), dec!(2));
        assert_eq!(exchange_ratio(Some(&catalog), Some(&eur), Some(&usd)), dec!(0.5));
        assert_eq!(exchange_ratio(Some(&catalog), Some(&usd), Some(&usd)), dec!(1));
    }

    #[test]
    fn test_ratio_zero_when_undefined() {
        let catalog = catalog();
        let usd = Currency::new("USD");
        let xyz = Currency::new("XYZ");

        assert!(exchange_ratio(Some(&catalog), Some(&usd), Some(&xyz)).is_zero());
        assert!(exchange_ratio(Some(&catalog), None, Some(&usd)).is_zero());
        assert!(exchange_ratio(Some(&catalog), Some(&usd), None).is_zero());
        assert!(exchange_ratio(None, Some(&usd), Some(&usd)).is_zero());
    }
}
