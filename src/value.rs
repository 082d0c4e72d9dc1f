//! Decoded form values
//!
//! One variant per shape a control literal can take. Values serialize to
//! JSON in their canonical literal form (dates as `YYYY-MM-DD`, decimals
//! as strings so no precision is lost).

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeSeq, Serializer};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A decoded control value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// Text, URI, email and single-choice literals
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Boolean(bool),
    Decimal(Decimal),
    /// Selected tokens of a multi-choice control, in document order
    Tokens(Vec<String>),
}

impl FormValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FormValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FormValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FormValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FormValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_tokens(&self) -> Option<&[String]> {
        match self {
            FormValue::Tokens(t) => Some(t),
            _ => None,
        }
    }

    /// Canonical XML literal of the value
    pub fn to_literal(&self) -> String {
        match self {
            FormValue::Text(s) => s.clone(),
            FormValue::Date(d) => d.format(DATE_FORMAT).to_string(),
            FormValue::Time(t) => {
                if t.nanosecond() == 0 {
                    t.format(TIME_FORMAT).to_string()
                } else {
                    t.format("%H:%M:%S%.f").to_string()
                }
            }
            FormValue::DateTime(dt) => {
                if dt.nanosecond() == 0 {
                    dt.format(DATE_TIME_FORMAT).to_string()
                } else {
                    dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
                }
            }
            FormValue::Boolean(b) => b.to_string(),
            FormValue::Decimal(d) => d.to_string(),
            FormValue::Tokens(t) => t.join(" "),
        }
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::Text(s.to_string())
    }
}

impl From<String> for FormValue {
    fn from(s: String) -> Self {
        FormValue::Text(s)
    }
}

impl From<bool> for FormValue {
    fn from(b: bool) -> Self {
        FormValue::Boolean(b)
    }
}

impl From<NaiveDate> for FormValue {
    fn from(d: NaiveDate) -> Self {
        FormValue::Date(d)
    }
}

impl From<NaiveTime> for FormValue {
    fn from(t: NaiveTime) -> Self {
        FormValue::Time(t)
    }
}

impl From<NaiveDateTime> for FormValue {
    fn from(dt: NaiveDateTime) -> Self {
        FormValue::DateTime(dt)
    }
}

impl From<Decimal> for FormValue {
    fn from(d: Decimal) -> Self {
        FormValue::Decimal(d)
    }
}

impl Serialize for FormValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FormValue::Boolean(b) => serializer.serialize_bool(*b),
            FormValue::Tokens(tokens) => {
                let mut seq = serializer.serialize_seq(Some(tokens.len()))?;
                for token in tokens {
                    seq.serialize_element(token)?;
                }
                seq.end()
            }
            other => serializer.serialize_str(&other.to_literal()),
        }
    }
}
