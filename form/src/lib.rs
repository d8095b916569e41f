//! TokenSwap Form Engine
//!
//! Keeps the two halves of a currency swap form consistent. The user drives
//! one side's amount; the other side is derived through the exchange ratio
//! taken from the price catalog.
//!
//! Every mutation recomputes explicitly: there is no observer graph. The only
//! deferred work is the settle task that clears the "computing" flag, which
//! runs on a [`SettleScheduler`] so tests can drive it with a
//! [`VirtualClock`].

pub mod clock;
pub mod config;
pub mod engine;
pub mod scheduler;
pub mod side;
pub mod state;

pub use clock::VirtualClock;
pub use config::SwapConfig;
pub use engine::SwapFormEngine;
pub use scheduler::{SettleHandle, SettleScheduler, SettleTask, TokioScheduler};
pub use side::{Side, SwapSide};
pub use state::SwapFormState;
