//! Error types with fix suggestions
//!
//! Error code ranges:
//! - FORM-000-009: Input errors (encoding, XML syntax)
//! - FORM-010-019: Runner construction errors
//! - FORM-020-029: Definition structure errors
//! - FORM-030-039: Lookup errors
//! - FORM-040-049: Value decoding errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// A literal that does not match the grammar of its control kind.
///
/// Cloneable so a Runner can keep the outcome of every decode and hand
/// the error out again on each access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("FORM-041: Cannot decode '{literal}' as {expected}")]
pub struct DecodeError {
    pub literal: String,
    pub expected: &'static str,
}

impl DecodeError {
    pub fn new(literal: impl Into<String>, expected: &'static str) -> Self {
        Self {
            literal: literal.into(),
            expected,
        }
    }
}

#[derive(Error, Debug)]
pub enum FormError {
    // ─────────────────────────────────────────────────────────────
    // Input errors (FORM-001 to FORM-002)
    // ─────────────────────────────────────────────────────────────
    #[error("FORM-001: Document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("FORM-002: XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    // ─────────────────────────────────────────────────────────────
    // Runner construction errors (FORM-010 to FORM-011)
    // ─────────────────────────────────────────────────────────────
    #[error("FORM-010: Runner accepts either a builder or builder XML, not both")]
    ConflictingSources,

    #[error("FORM-011: Runner needs either a builder or builder XML")]
    MissingSource,

    // ─────────────────────────────────────────────────────────────
    // Definition errors (FORM-020)
    // ─────────────────────────────────────────────────────────────
    #[error("FORM-020: Body element references unknown bind '{bind_id}'")]
    UnknownBind { bind_id: String },

    // ─────────────────────────────────────────────────────────────
    // Lookup errors (FORM-030)
    // ─────────────────────────────────────────────────────────────
    #[error("FORM-030: Control '{name}' is not defined by the form")]
    ControlNotFound { name: String },

    // ─────────────────────────────────────────────────────────────
    // Decoding errors (FORM-040)
    // ─────────────────────────────────────────────────────────────
    #[error("FORM-040: Invalid value for control '{name}': {source}")]
    Decode {
        name: String,
        #[source]
        source: DecodeError,
    },
}

impl FormError {
    /// Attach the control name to a decode failure
    pub fn decode(name: impl Into<String>, source: DecodeError) -> Self {
        FormError::Decode {
            name: name.into(),
            source,
        }
    }

    /// True for lookups of names the Builder never registered
    pub fn is_not_found(&self) -> bool {
        matches!(self, FormError::ControlNotFound { .. })
    }
}

impl FixSuggestion for FormError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            FormError::Utf8(_) => Some("Re-encode the document as UTF-8"),
            FormError::Xml(_) => Some("Check that the document is well-formed and declares every prefix"),
            FormError::ConflictingSources => {
                Some("Pass a shared Builder or the definition bytes, but only one of them")
            }
            FormError::MissingSource => {
                Some("Call .builder(..) or .builder_xml(..) before .build()")
            }
            FormError::UnknownBind { .. } => {
                Some("Every bind=\"..\" attribute in fr:body must match an xf:bind id under fr-form-binds")
            }
            FormError::ControlNotFound { .. } => {
                Some("Use a control name listed by Builder::controls()")
            }
            FormError::Decode { .. } => {
                Some("Fix the instance value to match the control's declared type")
            }
        }
    }
}

impl FixSuggestion for DecodeError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self.expected {
            "date" => Some("Use YYYY-MM-DD"),
            "time" => Some("Use HH:MM:SS (24h)"),
            "dateTime" => Some("Use YYYY-MM-DDTHH:MM:SS"),
            "boolean" => Some("Use the literal true or false"),
            "decimal" => Some("Use a plain base-10 number such as 12.50"),
            _ => None,
        }
    }
}
