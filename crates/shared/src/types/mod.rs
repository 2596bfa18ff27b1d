//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{AMOUNT_SCALE, AmountError, MAX_AMOUNT, format_amount, parse_positive_amount};
