//! Control type registry
//!
//! Maps the `type` attribute of an `xf:bind` to the control kind that
//! knows how to decode and encode its literals. Initialized once on
//! first use and read-only afterwards.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::binding::ControlKind;

/// Declared type of a bind without a `type` attribute
pub const DEFAULT_TYPE: &str = "xf:string";

static REGISTRY: Lazy<FxHashMap<&'static str, ControlKind>> = Lazy::new(|| {
    let entries = [
        ("xf:string", ControlKind::Text),
        ("xs:string", ControlKind::Text),
        ("xf:date", ControlKind::Date),
        ("xs:date", ControlKind::Date),
        ("xf:time", ControlKind::Time),
        ("xs:time", ControlKind::Time),
        ("xf:dateTime", ControlKind::DateTime),
        ("xs:dateTime", ControlKind::DateTime),
        ("xf:boolean", ControlKind::Boolean),
        ("xs:boolean", ControlKind::Boolean),
        ("xf:anyURI", ControlKind::AnyUri),
        ("xs:anyURI", ControlKind::AnyUri),
        ("xf:email", ControlKind::Email),
        ("xf:decimal", ControlKind::Decimal),
        ("xs:decimal", ControlKind::Decimal),
    ];
    entries.into_iter().collect()
});

/// Control kind registered for a declared type, if any
pub fn lookup(declared_type: &str) -> Option<ControlKind> {
    REGISTRY.get(declared_type).copied()
}
