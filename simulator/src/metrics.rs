//! Simulation metrics.

/// Counters for one scenario run.
#[derive(Debug, Clone, Default)]
pub struct SimulationMetrics {
    /// Steps executed.
    pub steps: u64,
    /// Currency selections.
    pub currency_changes: u64,
    /// Amounts typed.
    pub amount_edits: u64,
    /// Successful catalog refreshes.
    pub catalog_refreshes: u64,
    /// Failed catalog refreshes.
    pub refresh_failures: u64,
    /// Expectations that held.
    pub expectations_passed: u64,
    /// Expectations that did not hold.
    pub expectations_failed: u64,
}

impl SimulationMetrics {
    /// Create new metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an expectation outcome.
    pub fn record_expectation(&mut self, held: bool) {
        if held {
            self.expectations_passed += 1;
        } else {
            self.expectations_failed += 1;
        }
    }

    /// Record a catalog refresh outcome.
    pub fn record_refresh(&mut self, ok: bool) {
        if ok {
            self.catalog_refreshes += 1;
        } else {
            self.refresh_failures += 1;
        }
    }

    /// Check if every expectation held.
    pub fn all_passed(&self) -> bool {
        self.expectations_failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let mut metrics = SimulationMetrics::new();

        metrics.record_expectation(true);
        metrics.record_expectation(true);
        assert!(metrics.all_passed());

        metrics.record_expectation(false);
        metrics.record_refresh(true);
        metrics.record_refresh(false);

        assert_eq!(metrics.expectations_passed, 2);
        assert_eq!(metrics.expectations_failed, 1);
        assert_eq!(metrics.catalog_refreshes, 1);
        assert_eq!(metrics.refresh_failures, 1);
        assert!(!metrics.all_passed());
    }
}
