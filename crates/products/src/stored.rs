//! Lenient readers for persisted product records.
//!
//! Older documents may hold negative numbers, numbers written as text, nulls
//! or numbers where text belongs. One odd field must not make the whole
//! collection unreadable, so each field is read through the same
//! parse-with-default policy as fresh input.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::{Deserializer, IgnoredAny};

use crate::coerce::{self, NumericInput};

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredNumber {
    Value(NumericInput),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredText {
    Text(String),
    Integer(i64),
    Float(f64),
    Other(IgnoredAny),
}

fn number<'de, D>(deserializer: D) -> Result<Option<NumericInput>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StoredNumber::deserialize(deserializer)? {
        StoredNumber::Value(value) => Some(value),
        StoredNumber::Other(_) => None,
    })
}

pub(crate) fn quantity<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce::quantity_or_default(number(deserializer)?.as_ref()))
}

/// A stored zero threshold is kept as written; only unreadable values default.
pub(crate) fn min_stock<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(deserializer)?
        .as_ref()
        .and_then(NumericInput::as_integer)
        .map(coerce::clamp_quantity)
        .unwrap_or(coerce::DEFAULT_MIN_STOCK))
}

pub(crate) fn price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce::price_or_default(number(deserializer)?.as_ref()))
}

/// Text field; numbers are rendered as text and anything else is empty.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StoredText::deserialize(deserializer)? {
        StoredText::Text(s) => s,
        StoredText::Integer(n) => n.to_string(),
        StoredText::Float(f) => f.to_string(),
        StoredText::Other(_) => String::new(),
    })
}
