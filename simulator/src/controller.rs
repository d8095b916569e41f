//! Simulation controller.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use tokenswap_common::Currency;
use tokenswap_form::{Side, SwapConfig, SwapFormEngine, TokioScheduler};
use tokenswap_pricing::{CatalogService, PriceFeed};

use crate::metrics::SimulationMetrics;
use crate::scenario::{Scenario, ScenarioStep};

/// Drives a swap form through scripted interactions.
pub struct SimulationController {
    /// Catalog source.
    service: CatalogService,
    /// Form under test.
    engine: SwapFormEngine<TokioScheduler>,
    /// Base URL for currency icons.
    icon_base_url: Option<String>,
    /// Simulation metrics.
    metrics: SimulationMetrics,
}

impl SimulationController {
    /// Create a new simulation controller on the current runtime.
    pub fn new(
        feed: Arc<dyn PriceFeed>,
        config: SwapConfig,
        icon_base_url: Option<String>,
    ) -> anyhow::Result<Self> {
        let scheduler = TokioScheduler::current()
            .ok_or_else(|| anyhow::anyhow!("Simulation requires a tokio runtime"))?;

        Ok(Self {
            service: CatalogService::new(feed),
            engine: SwapFormEngine::new(scheduler, config),
            icon_base_url,
            metrics: SimulationMetrics::new(),
        })
    }

    /// Load the initial catalog.
    pub async fn initialize(&mut self) -> anyhow::Result<()> {
        let catalog = self.service.refresh().await?;
        self.metrics.record_refresh(true);

        info!(
            currencies = catalog.len(),
            duplicates = catalog.report().duplicates_dropped,
            invalid = catalog.report().invalid_skipped,
            "Catalog loaded"
        );
        for currency in catalog.currencies() {
            match &self.icon_base_url {
                Some(base) => info!(currency = %currency, icon = %currency.icon_url(base), "Listed"),
                None => info!(currency = %currency, "Listed"),
            }
        }

        self.engine.set_catalog(catalog);
        Ok(())
    }

    /// Run a scenario.
    pub async fn run_scenario(&mut self, scenario: &Scenario) -> anyhow::Result<()> {
        info!("Running scenario: {} - {}", scenario.name, scenario.description);

        for step in &scenario.steps {
            self.execute_step(step).await;
            self.metrics.steps += 1;

            let state = self.engine.state();
            info!(
                from = state.from.amount(),
                to = state.to.amount(),
                ratio = %state.ratio,
                computing = state.is_computing,
                "Form state"
            );
        }

        if let Some(quote) = self.engine.quote() {
            info!(%quote, "Final quote");
        }

        Ok(())
    }

    /// Execute a single scenario step.
    async fn execute_step(&mut self, step: &ScenarioStep) {
        match step {
            ScenarioStep::SelectCurrency { side, currency } => {
                info!(%side, %currency, "Selecting currency");
                self.engine.set_currency(*side, Currency::new(currency.as_str()));
                self.metrics.currency_changes += 1;
            }
            ScenarioStep::EnterAmount { side, amount } => {
                info!(%side, %amount, "Entering amount");
                self.engine.set_amount(*side, amount);
                self.metrics.amount_edits += 1;
            }
            ScenarioStep::Wait { millis } => {
                info!("Waiting {}ms", millis);
                tokio::time::sleep(Duration::from_millis(*millis)).await;
            }
            ScenarioStep::RefreshCatalog => match self.service.refresh().await {
                Ok(catalog) => {
                    self.metrics.record_refresh(true);
                    self.engine.set_catalog(catalog);
                }
                Err(e) => {
                    self.metrics.record_refresh(false);
                    warn!(error = %e, "Refresh failed, form keeps its catalog");
                }
            },
            ScenarioStep::ExpectAmount { side, amount } => {
                let actual = self.engine.state().side(*side).amount().to_string();
                let held = actual == *amount;
                if held {
                    info!(%side, %amount, "Expectation held");
                } else {
                    warn!(%side, expected = %amount, %actual, "Expectation failed");
                }
                self.metrics.record_expectation(held);
            }
            ScenarioStep::ExpectSubmittable { submittable } => {
                let actual = self.engine.can_submit();
                let held = actual == *submittable;
                if held {
                    info!(submittable, "Expectation held");
                } else {
                    warn!(expected = submittable, actual, "Expectation failed");
                }
                self.metrics.record_expectation(held);
            }
        }
    }

    /// Get simulation metrics.
    pub fn get_metrics(&self) -> &SimulationMetrics {
        &self.metrics
    }

    /// Stop the form and cancel pending work.
    pub fn stop(&mut self) {
        self.engine.teardown();
    }
}
