//! Untyped pair-view payloads and the field coercions applied to them.
//!
//! A segment arrives either positionally (fixed field order) or keyed by
//! field name. The shape is resolved once here; field values that fail to
//! coerce fall back to a neutral default instead of failing the read.

use std::str::FromStr;

use alloy_primitives::Address;
use num_bigint::BigUint;
use num_traits::{FromPrimitive, Num, ToPrimitive, Zero};
use serde_json::{Map, Value};

pub const STATIC_FIELDS: &[&str] = &[
    "status",
    "pair",
    "token0",
    "token1",
    "quoteToken",
    "baseToken",
    "isQuote0",
    "supportsTax",
    "buyTaxBps",
    "sellTaxBps",
    "taxCollector",
    "lpFeeBps",
];

pub const DYNAMIC_FIELDS: &[&str] = &[
    "status",
    "pair",
    "reserve0",
    "reserve1",
    "blockTimestampLast",
    "raw0",
    "raw1",
    "accumulatedQuoteTax",
    "effective0",
    "effective1",
    "expectedRaw0",
    "expectedRaw1",
    "dust0",
    "dust1",
    "accountingOk",
];

pub const USER_FIELDS: &[&str] = &[
    "status",
    "pair",
    "user",
    "token0",
    "token1",
    "balance0",
    "balance1",
    "allowance0",
    "allowance1",
    "quoteBalance",
    "baseBalance",
];

/// One segment of a pair view, in either wire shape.
#[derive(Debug, Clone, Copy)]
pub enum Segment<'a> {
    Positional(&'a [Value]),
    Keyed(&'a Map<String, Value>),
}

impl<'a> Segment<'a> {
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Segment::Positional(items)),
            Value::Object(map) => Some(Segment::Keyed(map)),
            _ => None,
        }
    }

    /// Field by name for keyed segments, by position otherwise.
    pub fn field(&self, key: &str, index: usize) -> Option<&'a Value> {
        match self {
            Segment::Positional(items) => items.get(index),
            Segment::Keyed(map) => map.get(key),
        }
    }

    /// Whether every field in `fields` is present (by name or position).
    pub fn is_complete(&self, fields: &[&str]) -> bool {
        match self {
            Segment::Positional(items) => items.len() >= fields.len(),
            Segment::Keyed(map) => fields.iter().all(|f| map.contains_key(*f)),
        }
    }
}

/// Typed access to a segment through its field table.
pub(crate) struct FieldReader<'a> {
    segment: Segment<'a>,
    fields: &'static [&'static str],
}

impl<'a> FieldReader<'a> {
    /// `None` unless the segment carries every field of the table.
    pub(crate) fn new(segment: Segment<'a>, fields: &'static [&'static str]) -> Option<Self> {
        segment
            .is_complete(fields)
            .then_some(Self { segment, fields })
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        let index = self.fields.iter().position(|f| *f == name)?;
        self.segment.field(name, index)
    }

    pub(crate) fn address(&self, name: &str) -> Option<Address> {
        self.get(name).and_then(to_address)
    }

    pub(crate) fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(to_bool)
    }

    pub(crate) fn count(&self, name: &str) -> u64 {
        self.get(name).map_or(0, to_count)
    }

    pub(crate) fn amount(&self, name: &str) -> BigUint {
        self.get(name).map_or_else(BigUint::zero, to_amount)
    }
}

/// Address field value; non-strings and malformed strings are `None`.
pub fn to_address(value: &Value) -> Option<Address> {
    value.as_str().and_then(parse_address)
}

/// `0x` followed by exactly 40 hex digits, surrounding whitespace ignored.
pub fn parse_address(raw: &str) -> Option<Address> {
    let raw = raw.trim();
    let digits = raw.strip_prefix("0x")?;
    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Address::from_str(raw).ok()
}

/// `true`, any non-zero number, or the strings `"true"`/`"1"`.
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1"),
        _ => false,
    }
}

/// Non-negative integer from a number, decimal string or `0x` hex string;
/// fractions truncate.
pub fn to_count(value: &Value) -> u64 {
    let parsed = match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return v;
            }
            n.as_f64()
        }
        Value::String(s) => {
            let s = s.trim();
            if let Some(hex) = strip_hex_prefix(s) {
                return parse_hex(hex).map_or(0, |v| v.to_u64().unwrap_or(u64::MAX));
            }
            if let Ok(v) = s.parse::<u64>() {
                return v;
            }
            parse_numeric(s)
        }
        _ => None,
    };
    parsed
        .filter(|f| f.is_finite() && *f > 0.0)
        .map_or(0, |f| f.trunc() as u64)
}

/// Exact non-negative integer from a number, decimal string or `0x` hex
/// string. Anything else, including negatives, is zero.
pub fn to_amount(value: &Value) -> BigUint {
    match value {
        Value::Number(n) => {
            let text = n.to_string();
            if let Some(v) = parse_decimal(&text) {
                return v;
            }
            n.as_f64()
                .filter(|f| f.is_finite() && *f > 0.0)
                .and_then(|f| BigUint::from_f64(f.trunc()))
                .unwrap_or_default()
        }
        Value::String(s) => {
            let s = s.trim();
            let parsed = match strip_hex_prefix(s) {
                Some(hex) => parse_hex(hex),
                None => parse_decimal(s),
            };
            parsed.unwrap_or_default()
        }
        _ => BigUint::zero(),
    }
}

/// Numeric string as the lens encodes it: decimal (fractions allowed) or
/// `0x` hex. Non-finite results are rejected.
pub(crate) fn parse_numeric(text: &str) -> Option<f64> {
    let text = text.trim();
    let parsed = match strip_hex_prefix(text) {
        Some(hex) => parse_hex(hex).and_then(|v| v.to_f64()),
        None => text.parse::<f64>().ok(),
    };
    parsed.filter(|f| f.is_finite())
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

fn parse_hex(digits: &str) -> Option<BigUint> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    BigUint::from_str_radix(digits, 16).ok()
}

fn parse_decimal(text: &str) -> Option<BigUint> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::from_str_radix(text, 10).ok()
}
