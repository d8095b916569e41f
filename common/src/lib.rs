//! TokenSwap Common Types
//!
//! Shared types used across the TokenSwap crates: currency symbols, raw price
//! quotes, feed timestamps and the amount text handled by the swap form.

pub mod amount;
pub mod currency;
pub mod price;
pub mod time;

pub use amount::*;
pub use currency::*;
pub use price::*;
pub use time::*;
