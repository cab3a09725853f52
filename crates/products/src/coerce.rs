//! Parse-with-default policy for numeric product fields.
//!
//! Input arriving from forms, CSV files or JSON may carry numbers as numbers
//! or as free text. Malformed values never fail a write: each field falls back
//! to its default listed here. All fallbacks for the product entity go
//! through this module.

use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Default stock quantity when none (or garbage) is supplied.
pub const DEFAULT_QUANTITY: u64 = 0;

/// Default minimum stock threshold when none (or garbage) is supplied.
pub const DEFAULT_MIN_STOCK: u64 = 5;

/// Default unit price when none (or garbage) is supplied.
pub const DEFAULT_PRICE: Decimal = Decimal::ZERO;

/// Loosely-typed numeric input.
///
/// Text is read the way a lenient form parser would: leading whitespace is
/// skipped and the longest numeric prefix wins (`"12 units"` reads as `12`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl NumericInput {
    /// Integer reading of the input, flooring fractional values.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            NumericInput::Integer(n) => Some(*n),
            NumericInput::Float(f) if f.is_finite() => Some(f.floor() as i64),
            NumericInput::Float(_) => None,
            NumericInput::Text(s) => leading_integer(s),
        }
    }

    /// Decimal reading of the input.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            NumericInput::Integer(n) => Some(Decimal::from(*n)),
            // Shortest round-trip text first, so 950.5 stays 950.5.
            NumericInput::Float(f) => Decimal::from_str(&f.to_string())
                .ok()
                .or_else(|| Decimal::from_f64(*f)),
            NumericInput::Text(s) => leading_decimal(s),
        }
    }
}

impl From<i32> for NumericInput {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for NumericInput {
    fn from(value: u64) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Clamp a signed quantity into the non-negative domain.
pub fn clamp_quantity(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Clamp a price into the non-negative domain.
pub fn clamp_price(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        Decimal::ZERO
    } else {
        value
    }
}

pub fn quantity_or_default(input: Option<&NumericInput>) -> u64 {
    input
        .and_then(NumericInput::as_integer)
        .map(clamp_quantity)
        .unwrap_or(DEFAULT_QUANTITY)
}

/// A zero threshold counts as unset and falls back to the default, like a
/// missing or unreadable one.
pub fn min_stock_or_default(input: Option<&NumericInput>) -> u64 {
    input
        .and_then(NumericInput::as_integer)
        .filter(|&n| n != 0)
        .map(clamp_quantity)
        .unwrap_or(DEFAULT_MIN_STOCK)
}

pub fn price_or_default(input: Option<&NumericInput>) -> Decimal {
    input
        .and_then(NumericInput::as_decimal)
        .map(clamp_price)
        .unwrap_or(DEFAULT_PRICE)
}

/// Split an optional sign off the front of already left-trimmed text.
fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

fn digit_prefix(s: &str) -> &str {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    &s[..end]
}

fn leading_integer(text: &str) -> Option<i64> {
    signed_digits(text.trim_start())
}

/// Optional `e`/`E` exponent with sign and at least one digit.
fn exponent_prefix(s: &str) -> Option<i64> {
    let rest = s.strip_prefix(['e', 'E'])?;
    signed_digits(rest)
}

/// Optional sign followed by digits at the very start of `s`. Saturates
/// instead of failing on absurdly long inputs.
fn signed_digits(s: &str) -> Option<i64> {
    let (negative, rest) = split_sign(s);
    let digits = digit_prefix(rest);
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

fn leading_decimal(text: &str) -> Option<Decimal> {
    let (negative, rest) = split_sign(text.trim_start());
    let whole = digit_prefix(rest);
    let after_whole = &rest[whole.len()..];
    let fraction = after_whole
        .strip_prefix('.')
        .map(digit_prefix)
        .unwrap_or("");

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let after_number = match after_whole.strip_prefix('.') {
        Some(tail) => &tail[fraction.len()..],
        None => after_whole,
    };

    let whole = if whole.is_empty() { "0" } else { whole };
    let sign = if negative { "-" } else { "" };
    let mantissa = if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    };

    match exponent_prefix(after_number) {
        Some(exp) => Decimal::from_scientific(&format!("{mantissa}e{exp}")).ok(),
        None => Decimal::from_str(&mantissa).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> NumericInput {
        NumericInput::from(s)
    }

    #[test]
    fn integer_text_uses_leading_digits() {
        assert_eq!(text("12").as_integer(), Some(12));
        assert_eq!(text("  42 units").as_integer(), Some(42));
        assert_eq!(text("-3").as_integer(), Some(-3));
        assert_eq!(text("+7").as_integer(), Some(7));
        assert_eq!(text("7.9").as_integer(), Some(7));
    }

    #[test]
    fn integer_text_without_digits_is_rejected() {
        assert_eq!(text("").as_integer(), None);
        assert_eq!(text("abc").as_integer(), None);
        assert_eq!(text("-").as_integer(), None);
        assert_eq!(text(".5").as_integer(), None);
    }

    #[test]
    fn floats_are_floored() {
        assert_eq!(NumericInput::from(3.7).as_integer(), Some(3));
        assert_eq!(NumericInput::from(-0.5).as_integer(), Some(-1));
        assert_eq!(NumericInput::from(f64::NAN).as_integer(), None);
    }

    #[test]
    fn huge_integer_text_saturates() {
        assert_eq!(text("99999999999999999999999").as_integer(), Some(i64::MAX));
    }

    #[test]
    fn decimal_text_uses_leading_number() {
        assert_eq!(text("12.50").as_decimal(), Some(Decimal::new(1250, 2)));
        assert_eq!(text(".5").as_decimal(), Some(Decimal::new(5, 1)));
        assert_eq!(text("3.").as_decimal(), Some(Decimal::from(3)));
        assert_eq!(text("1500 ARS").as_decimal(), Some(Decimal::from(1500)));
        assert_eq!(text("ARS 1500").as_decimal(), None);
    }

    #[test]
    fn decimal_text_accepts_exponent_suffix() {
        assert_eq!(text("1.5e3").as_decimal(), Some(Decimal::from(1500)));
        assert_eq!(text("2E+2 units").as_decimal(), Some(Decimal::from(200)));
        assert_eq!(text("25e-1").as_decimal(), Some(Decimal::new(25, 1)));
        assert_eq!(text("7e").as_decimal(), Some(Decimal::from(7)));
        assert_eq!(text("1.5e3").as_integer(), Some(1));
    }

    #[test]
    fn defaults_apply_to_missing_and_malformed_fields() {
        assert_eq!(quantity_or_default(None), DEFAULT_QUANTITY);
        assert_eq!(quantity_or_default(Some(&text("lots"))), DEFAULT_QUANTITY);
        assert_eq!(min_stock_or_default(None), DEFAULT_MIN_STOCK);
        assert_eq!(min_stock_or_default(Some(&text("n/a"))), DEFAULT_MIN_STOCK);
        assert_eq!(price_or_default(None), DEFAULT_PRICE);
        assert_eq!(price_or_default(Some(&text("free"))), DEFAULT_PRICE);
    }

    #[test]
    fn zero_min_stock_falls_back_to_default() {
        assert_eq!(min_stock_or_default(Some(&NumericInput::from(0))), DEFAULT_MIN_STOCK);
        assert_eq!(min_stock_or_default(Some(&text("0"))), DEFAULT_MIN_STOCK);
        assert_eq!(min_stock_or_default(Some(&NumericInput::from(0.4))), DEFAULT_MIN_STOCK);
        assert_eq!(min_stock_or_default(Some(&NumericInput::from(3))), 3);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        assert_eq!(quantity_or_default(Some(&NumericInput::from(-5))), 0);
        assert_eq!(price_or_default(Some(&text("-10.5"))), Decimal::ZERO);
    }

    #[test]
    fn untagged_deserialization_keeps_the_json_shape() {
        let n: NumericInput = serde_json::from_str("12").unwrap();
        assert_eq!(n, NumericInput::Integer(12));
        let f: NumericInput = serde_json::from_str("12.5").unwrap();
        assert_eq!(f, NumericInput::Float(12.5));
        let s: NumericInput = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(s, NumericInput::Text("12".to_string()));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: coercion never panics and never yields a negative quantity.
            #[test]
            fn quantity_coercion_is_total(raw in ".{0,40}") {
                let _ = quantity_or_default(Some(&NumericInput::Text(raw.clone())));
                let _ = price_or_default(Some(&NumericInput::Text(raw)));
            }

            #[test]
            fn clamp_quantity_never_negative(n in any::<i64>()) {
                let clamped = clamp_quantity(n);
                if n >= 0 {
                    prop_assert_eq!(clamped, n as u64);
                } else {
                    prop_assert_eq!(clamped, 0);
                }
            }
        }
    }
}
