//! Latest-price catalog built from a raw price feed.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tokenswap_common::{Currency, PriceRecord};
use tracing::{debug, info, instrument, warn};

use crate::error::FetchResult;
use crate::feed::PriceFeed;

/// Statistics gathered while building a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records delivered by the feed.
    pub records_received: usize,
    /// Records discarded because another quote for the same currency won.
    pub duplicates_dropped: usize,
    /// Records skipped for a non-positive price.
    pub invalid_skipped: usize,
}

/// One canonical quote per currency.
///
/// The kept quote is the one with the greatest `date`. When two quotes for a
/// currency carry the same `date`, the one that appeared first in the feed
/// stays. A catalog is never modified after construction; refreshing means
/// building a new one.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: HashMap<Currency, PriceRecord>,
    report: LoadReport,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the full record list from `feed` and deduplicate it.
    #[instrument(skip(feed), fields(feed = feed.name()))]
    pub async fn load(feed: &dyn PriceFeed) -> FetchResult<Self> {
        let records = feed.fetch().await?;
        let catalog = Self::from_records(records);

        info!(
            currencies = catalog.len(),
            received = catalog.report.records_received,
            duplicates = catalog.report.duplicates_dropped,
            invalid = catalog.report.invalid_skipped,
            "Price catalog loaded"
        );

        Ok(catalog)
    }

    /// Deduplicate records, processing them in iteration order.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = PriceRecord>,
    {
        let mut report = LoadReport::default();
        let mut latest: HashMap<Currency, PriceRecord> = HashMap::new();

        for record in records {
            report.records_received += 1;

            if !record.is_valid() {
                warn!(
                    currency = %record.currency,
                    price = %record.price,
                    "Skipping quote with non-positive price"
                );
                report.invalid_skipped += 1;
                continue;
            }

            match latest.entry(record.currency.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
                Entry::Occupied(mut slot) => {
                    report.duplicates_dropped += 1;
                    if record.is_newer_than(slot.get()) {
                        debug!(
                            currency = %record.currency,
                            date = %record.date,
                            "Newer quote supersedes kept quote"
                        );
                        slot.insert(record);
                    }
                }
            }
        }

        Self {
            records: latest,
            report,
        }
    }

    /// Look up the latest quote for a currency.
    pub fn lookup(&self, currency: &Currency) -> Option<&PriceRecord> {
        self.records.get(currency)
    }

    /// Check whether a currency is catalogued.
    pub fn contains(&self, currency: &Currency) -> bool {
        self.records.contains_key(currency)
    }

    /// Catalogued currencies in symbol order.
    pub fn currencies(&self) -> Vec<Currency> {
        let mut currencies: Vec<Currency> = self.records.keys().cloned().collect();
        currencies.sort();
        currencies
    }

    /// Iterate over the kept quotes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &PriceRecord> {
        self.records.values()
    }

    /// Get the number of catalogued currencies.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Statistics from building this catalog.
    pub fn report(&self) -> LoadReport {
        self.report
    }
}
