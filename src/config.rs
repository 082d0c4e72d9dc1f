//! Builder configuration
//!
//! Well-known ids and element names of Orbeon form definitions. The
//! defaults match what Form Builder emits; every field can be overridden
//! and omitted fields fall back to their default when deserializing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    /// Locale used to pick the `resource` for labels, hints and alerts
    pub lang: String,
    /// `id` of the container holding every `xf:bind`
    pub binds_id: String,
    /// `id` of the `xf:instance` carrying the form's default values
    pub instance_id: String,
    /// `id` of the `xf:instance` carrying localized resources
    pub resources_id: String,
    /// Root element name of instance data
    pub form_element: String,
}

impl FormConfig {
    pub const DEFAULT_LANG: &'static str = "en";

    /// Default configuration for the given locale
    pub fn with_lang(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            ..Self::default()
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            lang: Self::DEFAULT_LANG.to_string(),
            binds_id: "fr-form-binds".to_string(),
            instance_id: "fr-form-instance".to_string(),
            resources_id: "fr-form-resources".to_string(),
            form_element: "form".to_string(),
        }
    }
}
