//! Amount parsing and display.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` from the moment user input is parsed.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Currency symbol used when rendering amounts.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Most decimal places an amount may carry (`NUMERIC(19, 4)`).
pub const AMOUNT_SCALE: u32 = 4;

/// Largest accepted amount, `999_999_999_999_999.9999` (`NUMERIC(19, 4)`).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x89E7_FFFF, 0x8AC7_2304, 0, false, AMOUNT_SCALE);

/// Errors produced while parsing a user-entered amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Nothing was entered.
    #[error("amount is required")]
    Empty,

    /// The input is not a decimal number.
    #[error("amount '{0}' is not a number")]
    NotANumber(String),

    /// The input parsed but is zero or negative.
    #[error("amount must be positive, got {0}")]
    NotPositive(Decimal),

    /// The input exceeds [`MAX_AMOUNT`].
    #[error("amount {0} exceeds the maximum of {MAX_AMOUNT}")]
    TooLarge(Decimal),

    /// The input has more than [`AMOUNT_SCALE`] decimal places.
    #[error("amount {0} has more than {AMOUNT_SCALE} decimal places")]
    TooPrecise(Decimal),
}

/// Parses user input into a strictly positive decimal amount.
///
/// Surrounding whitespace and a leading currency symbol are ignored.
///
/// # Errors
///
/// Returns an `AmountError` when the input is empty, not a number, not
/// greater than zero, above [`MAX_AMOUNT`], or finer than [`AMOUNT_SCALE`]
/// decimal places. Trailing zeros do not count towards the scale.
pub fn parse_positive_amount(input: &str) -> Result<Decimal, AmountError> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix(CURRENCY_SYMBOL)
        .map_or(trimmed, str::trim_start);

    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let amount =
        Decimal::from_str(trimmed).map_err(|_| AmountError::NotANumber(input.trim().to_string()))?;

    if amount <= Decimal::ZERO {
        return Err(AmountError::NotPositive(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(AmountError::TooLarge(amount));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(AmountError::TooPrecise(amount));
    }

    Ok(amount)
}

/// Renders an amount with the currency symbol and two decimal places.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{CURRENCY_SYMBOL}{:.2}", rounded.abs())
    } else {
        format!("{CURRENCY_SYMBOL}{:.2}", rounded.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("100", dec!(100))]
    #[case(" 42.50 ", dec!(42.50))]
    #[case("₹250", dec!(250))]
    #[case("₹ 0.01", dec!(0.01))]
    fn test_parse_positive_amount_accepts(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(parse_positive_amount(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_positive_amount_rejects_text() {
        assert_eq!(
            parse_positive_amount("abc"),
            Err(AmountError::NotANumber("abc".to_string()))
        );
    }

    #[test]
    fn test_parse_positive_amount_rejects_empty() {
        assert_eq!(parse_positive_amount(""), Err(AmountError::Empty));
        assert_eq!(parse_positive_amount("   "), Err(AmountError::Empty));
        assert_eq!(parse_positive_amount("₹"), Err(AmountError::Empty));
    }

    #[rstest]
    #[case("0", dec!(0))]
    #[case("-5", dec!(-5))]
    #[case("0.00", dec!(0))]
    fn test_parse_positive_amount_rejects_non_positive(
        #[case] input: &str,
        #[case] expected: Decimal,
    ) {
        assert_eq!(
            parse_positive_amount(input),
            Err(AmountError::NotPositive(expected))
        );
    }

    #[rstest]
    #[case("10.1234", dec!(10.1234))]
    #[case("10.12340000", dec!(10.1234))]
    #[case("999999999999999.9999", MAX_AMOUNT)]
    fn test_parse_positive_amount_accepts_storage_bounds(
        #[case] input: &str,
        #[case] expected: Decimal,
    ) {
        assert_eq!(parse_positive_amount(input).unwrap(), expected);
    }

    #[rstest]
    #[case("1000000000000000")]
    #[case("79228162514264337593543950335")]
    fn test_parse_positive_amount_rejects_too_large(#[case] input: &str) {
        assert!(matches!(
            parse_positive_amount(input),
            Err(AmountError::TooLarge(_))
        ));
    }

    #[rstest]
    #[case("10.12345")]
    #[case("0.00001")]
    fn test_parse_positive_amount_rejects_too_precise(#[case] input: &str) {
        assert!(matches!(
            parse_positive_amount(input),
            Err(AmountError::TooPrecise(_))
        ));
    }

    #[test]
    fn test_max_amount_constant() {
        assert_eq!(MAX_AMOUNT, dec!(999999999999999.9999));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(1250)), "₹1250.00");
        assert_eq!(format_amount(dec!(99.5)), "₹99.50");
        assert_eq!(format_amount(dec!(0)), "₹0.00");
        assert_eq!(format_amount(dec!(-20)), "-₹20.00");
        assert_eq!(format_amount(dec!(10.005)), "₹10.00");
    }

    #[test]
    fn test_amount_error_display() {
        assert_eq!(AmountError::Empty.to_string(), "amount is required");
        assert_eq!(
            AmountError::NotANumber("abc".into()).to_string(),
            "amount 'abc' is not a number"
        );
        assert_eq!(
            AmountError::NotPositive(dec!(-1)).to_string(),
            "amount must be positive, got -1"
        );
    }
}
