//! Parsing and formatting of user-entered decimal numbers.
//!
//! Both cart entry surfaces (the inline quantity editor and the manual-entry
//! form) go through [`parse_decimal`], so `"1,5"` and `"1.5"` always mean the
//! same thing.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Largest magnitude accepted from user input.
///
/// Keeps `price × quantity` and the running subtotal far away from
/// [`Decimal::MAX`].
pub const MAX_INPUT_MAGNITUDE: i64 = 1_000_000;

/// Errors that can occur when parsing a user-entered number.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    /// The input is empty or whitespace.
    #[error("value cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("'{0}' is not a number")]
    Invalid(String),
    /// The input is a number but too large in magnitude.
    #[error("value must be between -{max} and {max}")]
    OutOfRange {
        /// Maximum allowed magnitude.
        max: i64,
    },
}

/// Parse a decimal number entered by a user.
///
/// Accepts either `,` or `.` as the decimal separator. Thousands separators
/// are not supported, so `"1.000,5"` is rejected rather than guessed at.
///
/// # Errors
///
/// Returns [`NumberError`] if the input is blank, not a number, or larger
/// in magnitude than [`MAX_INPUT_MAGNITUDE`].
///
/// # Examples
///
/// ```
/// use easebarkod_core::types::number::parse_decimal;
///
/// assert_eq!(parse_decimal("1,5").unwrap(), parse_decimal("1.5").unwrap());
/// assert!(parse_decimal("abc").is_err());
/// ```
pub fn parse_decimal(input: &str) -> Result<Decimal, NumberError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NumberError::Empty);
    }

    if trimmed.contains(',') && trimmed.contains('.') {
        return Err(NumberError::Invalid(trimmed.to_owned()));
    }

    let normalized = trimmed.replace(',', ".");
    let value = Decimal::from_str(&normalized)
        .map_err(|_| NumberError::Invalid(trimmed.to_owned()))?;

    if value.abs() > Decimal::from(MAX_INPUT_MAGNITUDE) {
        return Err(NumberError::OutOfRange {
            max: MAX_INPUT_MAGNITUDE,
        });
    }

    Ok(value)
}

/// Format a decimal with `,` as the separator and no trailing zeros.
///
/// This is the form quantities are redisplayed in, on every surface.
#[must_use]
pub fn format_decimal_comma(value: Decimal) -> String {
    value.normalize().to_string().replace('.', ",")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_parse_period_and_comma_agree() {
        assert_eq!(parse_decimal("2.5").unwrap(), Decimal::new(25, 1));
        assert_eq!(parse_decimal("2,5").unwrap(), Decimal::new(25, 1));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_decimal("  3 ").unwrap(), Decimal::from(3));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_decimal(""), Err(NumberError::Empty));
        assert_eq!(parse_decimal("   "), Err(NumberError::Empty));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse_decimal("abc"), Err(NumberError::Invalid(_))));
        assert!(matches!(parse_decimal("1,2,3"), Err(NumberError::Invalid(_))));
        assert!(matches!(
            parse_decimal("1.000,5"),
            Err(NumberError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(matches!(
            parse_decimal("1000001"),
            Err(NumberError::OutOfRange { .. })
        ));
        assert!(parse_decimal("1000000").is_ok());
    }

    #[test]
    fn test_format_decimal_comma() {
        assert_eq!(format_decimal_comma(Decimal::new(1500, 3)), "1,5");
        assert_eq!(format_decimal_comma(Decimal::from(2)), "2");
        assert_eq!(format_decimal_comma(Decimal::new(125, 3)), "0,125");
    }

    proptest! {
        #[test]
        fn prop_comma_and_period_parse_alike(whole in 0u32..1_000_000, frac in 0u32..1000) {
            let period = parse_decimal(&format!("{whole}.{frac:03}")).unwrap();
            let comma = parse_decimal(&format!("{whole},{frac:03}")).unwrap();

            prop_assert_eq!(period, comma);
            prop_assert_eq!(period, Decimal::new(i64::from(whole) * 1000 + i64::from(frac), 3));
        }

        #[test]
        fn prop_comma_form_parses_back(whole in 0u32..1_000_000, frac in 0u32..1000) {
            let value = Decimal::new(i64::from(whole) * 1000 + i64::from(frac), 3);
            prop_assert_eq!(parse_decimal(&format_decimal_comma(value)).unwrap(), value);
        }
    }
}
