//! Test fixtures and helpers

#![allow(dead_code)]

use std::sync::Arc;

use orbeon_xml::{Builder, Runner};

/// Form Builder definition exercising every control family
pub const BUILDER_XML: &[u8] = include_bytes!("../data/test_controls_builder.xml");

/// Form Runner data for `BUILDER_XML`
pub const RUNNER_XML: &[u8] = include_bytes!("../data/test_controls_runner.xml");

/// Every bind id in `BUILDER_XML`
pub const BIND_IDS: &[&str] = &[
    "text-controls-bind",
    "input-bind",
    "htmlarea-bind",
    "output-bind",
    "secret-bind",
    "input-counter-bind",
    "textarea-bind",
    "textarea-counter-bind",
    "date-time-controls-bind",
    "date-bind",
    "time-bind",
    "datetime-bind",
    "dropdown-date-bind",
    "fields-date-bind",
    "selection-controls-bind",
    "autocomplete-bind",
    "yesno-input-bind",
    "checkbox-input-bind",
    "radio-buttons-bind",
    "open-select1-bind",
    "dropdown-bind",
    "dynamic-data-dropdown-bind",
    "checkboxes-bind",
    "multiple-list-bind",
    "attachment-controls-bind",
    "image-attachments-bind",
    "image-attachments-iteration-bind",
    "image-attachment-bind",
    "file-attachment-bind",
    "static-image-bind",
    "buttons-bind",
    "standard-button-bind",
    "link-button-bind",
    "typed-controls-bind",
    "email-bind",
    "currency-bind",
    "us-phone-bind",
    "number-bind",
    "us-state-bind",
    "age-bind",
    "us-address-bind",
];

/// Binds with no body element or with an unregistered type
pub const UNEXPOSED_BIND_IDS: &[&str] = &["image-attachments-iteration-bind", "age-bind"];

pub fn builder() -> Builder {
    Builder::new(BUILDER_XML, "en").expect("fixture definition parses")
}

pub fn shared_builder() -> Arc<Builder> {
    Arc::new(builder())
}

pub fn runner() -> Runner {
    Runner::with_builder(RUNNER_XML, shared_builder()).expect("fixture instance parses")
}

/// Control names derived from bind ids (`input-bind` → `input`)
pub fn control_names() -> Vec<String> {
    BIND_IDS
        .iter()
        .filter(|id| !UNEXPOSED_BIND_IDS.contains(id))
        .map(|id| id.trim_end_matches("-bind").to_string())
        .collect()
}

/// Minimal instance wrapping one value of the date section
pub fn date_time_instance(inner: &str) -> String {
    format!("<form><date-time-controls>{}</date-time-controls></form>", inner)
}
