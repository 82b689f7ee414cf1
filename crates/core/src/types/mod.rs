//! Value types for the register.
//!
//! This module provides type-safe wrappers for lira amounts and quantities.

pub mod number;
pub mod price;
pub mod quantity;

pub use number::NumberError;
pub use price::{CURRENCY_SYMBOL, Price};
pub use quantity::Quantity;
