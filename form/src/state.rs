//! Swap form state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokenswap_common::format_fixed;

use crate::side::{Side, SwapSide};

/// Everything the presentation layer reads from the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapFormState {
    /// Side being given.
    pub from: SwapSide,
    /// Side being received.
    pub to: SwapSide,
    /// `price(from) / price(to)`, or zero when undefined.
    pub ratio: Decimal,
    /// Side whose amount the user last typed into. The other side is derived.
    pub active_side: Option<Side>,
    /// A recomputation is waiting for its settle delay to elapse.
    pub is_computing: bool,
}

impl SwapFormState {
    /// A blank form.
    pub fn new() -> Self {
        Self {
            from: SwapSide::new(),
            to: SwapSide::new(),
            ratio: Decimal::ZERO,
            active_side: None,
            is_computing: false,
        }
    }

    /// Get one side.
    pub fn side(&self, side: Side) -> &SwapSide {
        match side {
            Side::From => &self.from,
            Side::To => &self.to,
        }
    }

    /// Get one side mutably.
    pub fn side_mut(&mut self, side: Side) -> &mut SwapSide {
        match side {
            Side::From => &mut self.from,
            Side::To => &mut self.to,
        }
    }

    /// Check if a side is the one being driven by the user.
    pub fn is_active(&self, side: Side) -> bool {
        self.active_side == Some(side)
    }

    /// Check if the swap may be submitted.
    ///
    /// Both currencies must be selected with a defined ratio, both amounts
    /// non-zero, and no recomputation may be settling. Amounts are compared
    /// numerically, so `"0.000"` counts as zero just like `"0"`.
    pub fn can_submit(&self) -> bool {
        self.from.has_currency()
            && self.to.has_currency()
            && self.ratio > Decimal::ZERO
            && !self.from.is_zero()
            && !self.to.is_zero()
            && !self.is_computing
    }

    /// Exchange rate line, e.g. `1 USD = 2.000000 EUR`. `None` while the
    /// ratio is undefined.
    pub fn quote(&self, places: u32) -> Option<String> {
        if self.ratio <= Decimal::ZERO {
            return None;
        }
        let (from, to) = (self.from.currency.as_ref()?, self.to.currency.as_ref()?);
        Some(format!("1 {} = {} {}", from, format_fixed(self.ratio, places), to))
    }
}

impl Default for SwapFormState {
    fn default() -> Self {
        Self::new()
    }
}
