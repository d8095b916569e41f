//! Swap form engine.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use rust_decimal::{Decimal, RoundingStrategy};
use tokenswap_common::{format_fixed, Currency, ZERO_AMOUNT};
use tokenswap_pricing::{exchange_ratio, Catalog};
use tracing::{debug, info, warn};

use crate::config::SwapConfig;
use crate::scheduler::{SettleHandle, SettleScheduler};
use crate::side::Side;
use crate::state::SwapFormState;

/// State shared with the pending settle task.
struct Shared {
    state: SwapFormState,
    /// Bumped on every propagation; a settle task only clears the computing
    /// flag if no propagation happened after it was scheduled.
    generation: u64,
}

/// Owns a [`SwapFormState`] and keeps its derived side in step with the
/// driven side.
///
/// All operations are infallible. Anything that prevents a conversion (no
/// catalog, unknown currency, out-of-range arithmetic) shows up as a zero
/// ratio or an unchanged amount, which in turn blocks submission.
pub struct SwapFormEngine<S: SettleScheduler> {
    catalog: Option<Arc<Catalog>>,
    shared: Arc<Mutex<Shared>>,
    scheduler: S,
    pending: Option<S::Handle>,
    config: SwapConfig,
    torn_down: bool,
}

impl<S: SettleScheduler> SwapFormEngine<S> {
    /// Create an engine over a blank form.
    pub fn new(scheduler: S, config: SwapConfig) -> Self {
        Self {
            catalog: None,
            shared: Arc::new(Mutex::new(Shared {
                state: SwapFormState::new(),
                generation: 0,
            })),
            scheduler,
            pending: None,
            config,
            torn_down: false,
        }
    }

    /// Start with a catalog already loaded.
    pub fn with_catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Snapshot of the form.
    pub fn state(&self) -> SwapFormState {
        self.shared.lock().state.clone()
    }

    /// Current exchange ratio.
    pub fn ratio(&self) -> Decimal {
        self.shared.lock().state.ratio
    }

    /// Check if a recomputation is still settling.
    pub fn is_computing(&self) -> bool {
        self.shared.lock().state.is_computing
    }

    /// Check if the swap may be submitted.
    pub fn can_submit(&self) -> bool {
        self.shared.lock().state.can_submit()
    }

    /// Exchange rate line for display.
    pub fn quote(&self) -> Option<String> {
        self.shared.lock().state.quote(self.config.decimal_places)
    }

    /// Catalog in use.
    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        self.catalog.as_ref()
    }

    /// Check if the engine was torn down.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Select the currency of one side.
    ///
    /// Any selection on the side the user is driving, even of the currency
    /// already shown, resets both amounts to `"0"`. The active side is left
    /// as is.
    pub fn set_currency(&mut self, side: Side, currency: impl Into<Currency>) {
        let currency = currency.into();
        if self.torn_down {
            warn!(side = %side, currency = %currency, "Ignoring currency change on torn-down engine");
            return;
        }

        {
            let mut shared = self.shared.lock();
            let state = &mut shared.state;

            if state.is_active(side) {
                debug!(side = %side, "Driven side switched currency, resetting amounts");
                state.from.reset_amount();
                state.to.reset_amount();
            }

            info!(side = %side, currency = %currency, "Currency selected");
            state.side_mut(side).currency = Some(currency);
        }

        if self.refresh_ratio() {
            self.propagate();
        }
    }

    /// Enter an amount on one side, making it the driven side.
    pub fn set_amount(&mut self, side: Side, raw: &str) {
        if self.torn_down {
            warn!(side = %side, "Ignoring amount change on torn-down engine");
            return;
        }

        {
            let mut shared = self.shared.lock();
            let state = &mut shared.state;
            state.side_mut(side).set_amount(raw);
            state.active_side = Some(side);
            debug!(side = %side, amount = state.side(side).amount(), "Amount entered");
        }

        self.propagate();
    }

    /// Swap in a freshly loaded catalog.
    pub fn set_catalog(&mut self, catalog: Arc<Catalog>) {
        if self.torn_down {
            warn!("Ignoring catalog refresh on torn-down engine");
            return;
        }

        info!(currencies = catalog.len(), "Catalog updated");
        self.catalog = Some(catalog);

        if self.refresh_ratio() {
            self.propagate();
        }
    }

    /// Recompute the ratio from the catalog, propagating if it changed.
    pub fn recompute_ratio(&mut self) -> Decimal {
        if !self.torn_down && self.refresh_ratio() {
            self.propagate();
        }
        self.ratio()
    }

    /// Rederive the passive side's amount and restart the settle delay.
    ///
    /// Any pending settle task is cancelled first. With no ratio the
    /// computing flag is cleared immediately and nothing is scheduled.
    pub fn propagate(&mut self) {
        if self.torn_down {
            debug!("Engine torn down, skipping propagation");
            return;
        }

        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }

        let places = self.config.decimal_places;
        let generation = {
            let mut shared = self.shared.lock();
            shared.generation += 1;

            let state = &mut shared.state;
            if state.ratio.is_zero() {
                state.is_computing = false;
                return;
            }
            state.is_computing = true;
            derive_amounts(state, places);

            shared.generation
        };

        let weak = Arc::downgrade(&self.shared);
        let handle = self.scheduler.schedule(
            self.config.settle_delay,
            Box::new(move || settle(&weak, generation)),
        );
        self.pending = Some(handle);
    }

    /// Cancel pending work and stop reacting to further input.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
        // a settle task already past its delay must not touch the state
        self.shared.lock().generation += 1;
        if !self.torn_down {
            self.torn_down = true;
            debug!("Swap form engine torn down");
        }
    }

    fn refresh_ratio(&self) -> bool {
        let mut shared = self.shared.lock();
        let state = &mut shared.state;
        let ratio = exchange_ratio(
            self.catalog.as_deref(),
            state.from.currency.as_ref(),
            state.to.currency.as_ref(),
        );

        if ratio == state.ratio {
            return false;
        }

        debug!(previous = %state.ratio, ratio = %ratio, "Exchange ratio changed");
        state.ratio = ratio;
        true
    }
}

impl<S: SettleScheduler> Drop for SwapFormEngine<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Clear the computing flag unless a later propagation or teardown
/// superseded `generation`.
fn settle(shared: &Weak<Mutex<Shared>>, generation: u64) {
    let Some(owner) = shared.upgrade() else {
        return;
    };
    let mut shared = owner.lock();
    if shared.generation == generation {
        shared.state.is_computing = false;
        debug!(generation, "Swap quote settled");
    }
}

fn derive_amounts(state: &mut SwapFormState, places: u32) {
    let Some(active) = state.active_side else {
        return;
    };

    let source = state.side(active).amount_value();
    let derived = match active {
        Side::From => source.checked_mul(state.ratio),
        Side::To => source.checked_div(state.ratio),
    };

    match derived {
        Some(value) => {
            let text = format_derived(value, places);
            debug!(side = %active.other(), amount = %text, "Derived amount");
            state.side_mut(active.other()).set_derived_amount(text);
        }
        None => warn!(
            side = %active,
            amount = %source,
            ratio = %state.ratio,
            "Derived amount out of range, leaving it unchanged"
        ),
    }
}

fn format_derived(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return ZERO_AMOUNT.to_string();
    }
    format_fixed(rounded, places)
}
