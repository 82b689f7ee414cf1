//! Type-safe price representation using decimal arithmetic.
//!
//! The register trades in Turkish lira only.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::number::{NumberError, parse_decimal};

/// Symbol prefixed to every displayed amount.
pub const CURRENCY_SYMBOL: &str = "₺";

/// An amount of Turkish lira.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    /// Amount in lira (not kuruş).
    pub amount: Decimal,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Parse a user-entered amount.
    ///
    /// # Errors
    ///
    /// Returns [`NumberError`] if the input is not an acceptable number.
    pub fn parse(input: &str) -> Result<Self, NumberError> {
        parse_decimal(input).map(Self::new)
    }

    /// Format for display with two decimals (e.g., "₺19.99").
    #[must_use]
    pub fn display(&self) -> String {
        let mut rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        format!("{CURRENCY_SYMBOL}{rounded}")
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
