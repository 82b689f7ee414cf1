//! Line item quantity.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::number::{NumberError, format_decimal_comma, parse_decimal};

/// Quantity of a line item.
///
/// Fractional quantities are allowed (goods sold by weight). A `Quantity`
/// always holds a real number; unparsable input never becomes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// A quantity of one.
    pub const ONE: Self = Self(Decimal::ONE);

    /// Create a quantity from a decimal value.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parse a user-entered quantity. Accepts `,` or `.` as decimal separator.
    ///
    /// # Errors
    ///
    /// Returns [`NumberError`] if the input is blank, not a number, or out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use easebarkod_core::Quantity;
    ///
    /// assert_eq!(Quantity::parse("0,5").unwrap(), Quantity::parse("0.5").unwrap());
    /// assert!(Quantity::parse("iki").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, NumberError> {
        parse_decimal(input).map(Self)
    }

    /// Returns the underlying decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Form shown in quantity input fields (`1,5`).
    #[must_use]
    pub fn to_input_string(&self) -> String {
        format_decimal_comma(self.0)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<Decimal> for Quantity {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(Decimal::from(value))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_input_string())
    }
}

impl std::str::FromStr for Quantity {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one() {
        assert_eq!(Quantity::default(), Quantity::ONE);
        assert_eq!(Quantity::default().value(), Decimal::ONE);
    }

    #[test]
    fn test_parse_fractional() {
        let q: Quantity = "0,250".parse().unwrap();
        assert_eq!(q.value(), Decimal::new(25, 2));
        assert_eq!(q.to_input_string(), "0,25");
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(matches!(
            Quantity::parse("bir"),
            Err(NumberError::Invalid(_))
        ));
    }

    #[test]
    fn test_serde_transparent() {
        let q = Quantity::parse("1.5").unwrap();
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, "\"1.5\"");
        let back: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }
}
