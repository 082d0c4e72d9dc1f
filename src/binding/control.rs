//! Typed controls
//!
//! A Control pairs a Bind with a snapshot of the body element that
//! presents it. Decoding and encoding dispatch on `ControlKind`, a closed
//! set: the select kinds come from the body tag, every other kind from
//! the registry.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::Node;
use rust_decimal::Decimal;

use crate::binding::bind::Bind;
use crate::binding::path::InstancePath;
use crate::error::DecodeError;
use crate::value::{FormValue, DATE_FORMAT};

// Lexical forms, checked before handing literals to chrono and rust_decimal
static DATE_LEXICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());
static TIME_LEXICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?$").unwrap());
static DATE_TIME_LEXICAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?$").unwrap()
});
static DECIMAL_LEXICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Text,
    Date,
    Time,
    DateTime,
    Boolean,
    AnyUri,
    Email,
    Decimal,
    /// Single choice (`select1` tag)
    Select1,
    /// Multiple choice (`select` tag)
    Select,
}

impl ControlKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlKind::Text => "text",
            ControlKind::Date => "date",
            ControlKind::Time => "time",
            ControlKind::DateTime => "dateTime",
            ControlKind::Boolean => "boolean",
            ControlKind::AnyUri => "anyURI",
            ControlKind::Email => "email",
            ControlKind::Decimal => "decimal",
            ControlKind::Select1 => "select1",
            ControlKind::Select => "select",
        }
    }

    /// Kinds whose literal is kept verbatim
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            ControlKind::Text | ControlKind::AnyUri | ControlKind::Email | ControlKind::Select1
        )
    }

    /// Kinds parsed into a typed value rather than kept as text
    pub fn is_typed(&self) -> bool {
        !self.is_textual() && *self != ControlKind::Select
    }

    /// Decode an XML literal
    ///
    /// Absent literals decode to `None` for every kind. Typed kinds also
    /// treat blank literals as absent and ignore surrounding whitespace.
    pub fn decode(&self, raw: Option<&str>) -> Result<Option<FormValue>, DecodeError> {
        let Some(raw) = raw else {
            return Ok(None);
        };

        let literal = raw.trim();
        if self.is_typed() && literal.is_empty() {
            return Ok(None);
        }
        let err = || DecodeError::new(raw, self.as_str());

        let value = match self {
            ControlKind::Text | ControlKind::AnyUri | ControlKind::Email | ControlKind::Select1 => {
                FormValue::Text(raw.to_string())
            }
            ControlKind::Select => {
                FormValue::Tokens(raw.split_whitespace().map(str::to_string).collect())
            }
            ControlKind::Date => {
                lexical(&DATE_LEXICAL, literal).ok_or_else(err)?;
                FormValue::Date(NaiveDate::parse_from_str(literal, DATE_FORMAT).map_err(|_| err())?)
            }
            ControlKind::Time => {
                lexical(&TIME_LEXICAL, literal).ok_or_else(err)?;
                FormValue::Time(NaiveTime::parse_from_str(literal, "%H:%M:%S%.f").map_err(|_| err())?)
            }
            ControlKind::DateTime => {
                lexical(&DATE_TIME_LEXICAL, literal).ok_or_else(err)?;
                FormValue::DateTime(
                    NaiveDateTime::parse_from_str(literal, "%Y-%m-%dT%H:%M:%S%.f").map_err(|_| err())?,
                )
            }
            ControlKind::Boolean => match literal {
                "true" => FormValue::Boolean(true),
                "false" => FormValue::Boolean(false),
                _ => return Err(err()),
            },
            ControlKind::Decimal => FormValue::Decimal(decode_decimal(literal).ok_or_else(err)?),
        };
        Ok(Some(value))
    }

    /// Encode a value into its canonical XML literal
    ///
    /// Fails when the value's shape does not belong to this kind.
    pub fn encode(&self, value: &FormValue) -> Result<String, DecodeError> {
        let accepted = match (self, value) {
            (k, FormValue::Text(_)) if k.is_textual() => true,
            (ControlKind::Date, FormValue::Date(_))
            | (ControlKind::Time, FormValue::Time(_))
            | (ControlKind::DateTime, FormValue::DateTime(_))
            | (ControlKind::Boolean, FormValue::Boolean(_))
            | (ControlKind::Decimal, FormValue::Decimal(_))
            | (ControlKind::Select, FormValue::Tokens(_)) => true,
            _ => false,
        };

        if accepted {
            Ok(value.to_literal())
        } else {
            Err(DecodeError::new(value.to_literal(), self.as_str()))
        }
    }
}

fn lexical(pattern: &Regex, literal: &str) -> Option<()> {
    pattern.is_match(literal).then_some(())
}

/// Exact base-10 decode; `None` when the literal is malformed or would
/// lose digits
fn decode_decimal(literal: &str) -> Option<Decimal> {
    lexical(&DECIMAL_LEXICAL, literal)?;
    let value = Decimal::from_str_exact(literal).ok()?;
    let fraction_digits = literal.split_once('.').map_or(0, |(_, f)| f.len());
    (value.scale() as usize == fraction_digits).then_some(value)
}

/// What a control needs from the body element presenting it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlElement {
    /// Local name of the element (`input`, `select1`, `section`, ...)
    pub tag: String,
    pub label: Option<String>,
    pub hint: Option<String>,
    pub alert: Option<String>,
}

impl ControlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    kind: ControlKind,
    bind: Bind,
    element: ControlElement,
    default_raw_value: Option<String>,
}

impl Control {
    pub fn new(
        kind: ControlKind,
        bind: Bind,
        element: ControlElement,
        default_raw_value: Option<String>,
    ) -> Self {
        Self {
            kind,
            bind,
            element,
            default_raw_value,
        }
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn bind(&self) -> &Bind {
        &self.bind
    }

    /// Control name, the name of its bind
    pub fn name(&self) -> &str {
        &self.bind.name
    }

    /// Parent bind, shortcut for `bind().parent`
    pub fn parent(&self) -> Option<&Bind> {
        self.bind.parent.as_deref()
    }

    pub fn element(&self) -> &ControlElement {
        &self.element
    }

    pub fn label(&self) -> Option<&str> {
        self.element.label.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.element.hint.as_deref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.element.alert.as_deref()
    }

    pub fn default_raw_value(&self) -> Option<&str> {
        self.default_raw_value.as_deref()
    }

    /// Default value decoded on access
    pub fn default_value(&self) -> Result<Option<FormValue>, DecodeError> {
        self.decode(self.default_raw_value.as_deref())
    }

    pub fn decode(&self, raw: Option<&str>) -> Result<Option<FormValue>, DecodeError> {
        self.kind.decode(raw)
    }

    pub fn encode(&self, value: &FormValue) -> Result<String, DecodeError> {
        self.kind.encode(value)
    }

    /// Decode the text content of an instance element
    pub fn decode_form_element(&self, element: Node) -> Result<Option<FormValue>, DecodeError> {
        self.decode(element.text())
    }

    /// Location of this control's value in instance data
    pub fn instance_path(&self, form_element: &str) -> Option<InstancePath> {
        InstancePath::for_control(self, form_element)
    }
}
