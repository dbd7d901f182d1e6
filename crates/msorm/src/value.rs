//! Bound values.
//!
//! [`Value`] is what flows through a [`Buffer`](crate::Buffer) into the
//! argument list, and what a [`Row`](crate::Row) hands back.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt::Write as _;
use uuid::Uuid;

use crate::config::DialectConfig;

/// A value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    Uuid(Uuid),
    Json(serde_json::Value),
    #[cfg(feature = "rust_decimal")]
    Decimal(rust_decimal::Decimal),
}

impl Value {
    /// Whether this is SQL `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer view of the value, used for generated ids.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            Value::String(s) => s.trim().parse().ok(),
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(d) => {
                use rust_decimal::prelude::ToPrimitive;
                d.to_i64()
            }
            _ => None,
        }
    }

    /// Append this value as a SQL literal.
    pub(crate) fn write_literal(&self, out: &mut String, config: &DialectConfig) {
        match self {
            Value::Null => out.push_str("NULL"),
            Value::Bool(true) => out.push_str(&config.bool_true),
            Value::Bool(false) => out.push_str(&config.bool_false),
            Value::Int(v) => {
                let _ = write!(out, "{v}");
            }
            Value::Float(v) => {
                let _ = write!(out, "{v}");
            }
            Value::String(s) => write_quoted(out, s, config),
            Value::Bytes(bytes) => {
                out.push_str("0x");
                for b in bytes {
                    let _ = write!(out, "{b:02X}");
                }
            }
            Value::Date(d) => write_quoted(out, &d.format("%Y-%m-%d").to_string(), config),
            Value::Time(t) => write_quoted(out, &t.format("%H:%M:%S").to_string(), config),
            Value::DateTime(dt) => {
                write_quoted(out, &dt.format("%Y-%m-%d %H:%M:%S").to_string(), config)
            }
            Value::DateTimeOffset(dt) => write_quoted(
                out,
                &dt.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
                config,
            ),
            Value::Uuid(u) => write_quoted(out, &u.to_string(), config),
            Value::Json(v) => write_quoted(out, &v.to_string(), config),
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(d) => {
                let _ = write!(out, "{d}");
            }
        }
    }
}

pub(crate) fn write_quoted(out: &mut String, s: &str, config: &DialectConfig) {
    let quote = &config.quote;
    out.push_str(&quote.value_quote);
    out.push_str(&s.replace(quote.value_quote.as_str(), &quote.value_quote_escape));
    out.push_str(&quote.value_quote);
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(v as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::DateTimeOffset(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

#[cfg(feature = "rust_decimal")]
impl From<rust_decimal::Decimal> for Value {
    fn from(v: rust_decimal::Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(v: Value) -> String {
        let mut out = String::new();
        v.write_literal(&mut out, &DialectConfig::default());
        out
    }

    #[test]
    fn literals() {
        assert_eq!(literal(Value::Null), "NULL");
        assert_eq!(literal(true.into()), "1");
        assert_eq!(literal(false.into()), "0");
        assert_eq!(literal(42.into()), "42");
        assert_eq!(literal(1.5.into()), "1.5");
        assert_eq!(literal("it's".into()), "'it''s'");
        assert_eq!(literal(vec![0x0a, 0xff].into()), "0x0AFF");
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(literal(date.into()), "'2024-03-09'");
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(5)), Value::Int(5));
    }

    #[test]
    fn as_i64() {
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::Float(3.0).as_i64(), Some(3));
        assert_eq!(Value::String(" 12 ".into()).as_i64(), Some(12));
        assert_eq!(Value::Bool(true).as_i64(), None);
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&Value::from("x")).unwrap();
        assert_eq!(json, "\"x\"");
        let json = serde_json::to_string(&Value::Int(3)).unwrap();
        assert_eq!(json, "3");
    }
}
