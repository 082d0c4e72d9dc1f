//! # Runner Tests
//!
//! Reads Form Runner data against the shared test definition:
//! - value lookups by canonical and sanitized name
//! - absent values vs unknown controls vs malformed literals
//! - construction modes (shared builder, definition bytes, neither, both)
//! - documented limitations of the one-level path strategy

mod common;

use chrono::{NaiveDate, NaiveTime};
use orbeon_xml::{Builder, FormError, FormValue, Runner};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// VALUE LOOKUP TESTS
// ============================================================================

mod value_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fields_date_by_name_and_sanitized_name() {
        let runner = common::runner();
        let expected = FormValue::Date(date(2017, 7, 1));

        assert_eq!(runner.get_value("fields-date").unwrap(), Some(&expected));
        assert_eq!(runner.form().get("fieldsdate").unwrap(), Some(&expected));
    }

    #[test]
    fn typed_values() {
        let runner = common::runner();

        assert_eq!(runner.get_value("date").unwrap(), Some(&FormValue::Date(date(2017, 7, 3))));
        assert_eq!(
            runner.get_value("time").unwrap(),
            Some(&FormValue::Time(NaiveTime::from_hms_opt(10, 20, 30).unwrap()))
        );
        assert_eq!(
            runner.get_value("datetime").unwrap(),
            Some(&FormValue::DateTime(date(2017, 7, 1).and_hms_opt(10, 20, 30).unwrap()))
        );
        assert_eq!(runner.get_value("yesno-input").unwrap(), Some(&FormValue::Boolean(true)));
        assert_eq!(runner.get_value("checkbox-input").unwrap(), Some(&FormValue::Boolean(false)));
        assert_eq!(
            runner.get_value("currency").unwrap(),
            Some(&FormValue::Decimal(Decimal::from_str("12.50").unwrap()))
        );
    }

    #[test]
    fn textual_values_pass_through() {
        let runner = common::runner();

        assert_eq!(runner.get_value("input").unwrap(), Some(&FormValue::from("Michelle Obama")));
        assert_eq!(runner.get_value("htmlarea").unwrap(), Some(&FormValue::from("<p>Hello</p>")));
        assert_eq!(runner.get_value("email").unwrap(), Some(&FormValue::from("info@example.org")));
        assert_eq!(runner.get_value("radio-buttons").unwrap(), Some(&FormValue::from("dog")));
        assert_eq!(
            runner.get_value("file-attachment").unwrap(),
            Some(&FormValue::from("file:/tmp/report.bin"))
        );
        assert_eq!(
            runner.get_raw_value("textarea").unwrap(),
            Some("Line one\nLine two")
        );
    }

    #[test]
    fn multi_select_splits_tokens() {
        let runner = common::runner();
        let value = runner.get_value("checkboxes").unwrap().unwrap();
        assert_eq!(value.as_tokens().unwrap(), ["cat", "dog", "fish"]);
        assert_eq!(runner.get_raw_value("checkboxes").unwrap(), Some("cat dog fish"));
    }

    #[test]
    fn empty_elements_are_present_but_null() {
        let runner = common::runner();

        assert!(runner.has_value("dropdown-date"));
        assert_eq!(runner.get_raw_value("dropdown-date").unwrap(), None);
        assert_eq!(runner.get_value("dropdown-date").unwrap(), None);
        assert_eq!(runner.get_value("output").unwrap(), None);
    }

    #[test]
    fn malformed_literal_is_distinct_from_absent() {
        let runner = common::runner();

        assert_eq!(runner.get_raw_value("number").unwrap(), Some("not a number"));
        let err = runner.get_value("number").unwrap_err();
        match err {
            FormError::Decode { name, source } => {
                assert_eq!(name, "number");
                assert_eq!(source.expected, "decimal");
                assert_eq!(source.literal, "not a number");
            }
            other => panic!("expected decode error, got {other}"),
        }
        assert!(runner.form().get("number").is_err());
    }

    #[test]
    fn unknown_control_is_not_found() {
        let runner = common::runner();

        let err = runner.get_value("unknown-control").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("unknown-control"));
        assert!(runner.get_raw_value("unknown-control").unwrap_err().is_not_found());
        // Unregistered types are never part of the catalog
        assert!(runner.get_value("age").unwrap_err().is_not_found());
    }

    #[test]
    fn sanitized_facade_sentinel() {
        let runner = common::runner();
        let form = runner.form();

        assert_eq!(form.get("unknowncontrol").unwrap(), Some(&FormValue::Boolean(false)));
        assert_eq!(form.get("textareacounter").unwrap(), None);
        assert_eq!(form.get("yesnoinput").unwrap(), Some(&FormValue::Boolean(true)));
    }

    #[test]
    fn values_serialize_to_json() {
        let value = common::runner().to_value();

        assert_eq!(value["fields-date"], json!("2017-07-01"));
        assert_eq!(value["yesno-input"], json!(true));
        assert_eq!(value["currency"], json!("12.50"));
        assert_eq!(value["checkboxes"], json!(["cat", "dog", "fish"]));
        assert_eq!(value["dropdown-date"], json!(null));
        assert_eq!(value["number"], json!("not a number"));
        assert!(value.get("us-address").is_none());
    }
}

// ============================================================================
// ABSENT VALUE TESTS
// ============================================================================

mod absent_value_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_element_reads_as_none() {
        let xml = common::date_time_instance("<date>2017-07-03</date>");
        let runner = Runner::with_builder(xml.as_bytes(), common::shared_builder()).unwrap();

        assert!(!runner.has_value("fields-date"));
        assert_eq!(runner.get_value("fields-date").unwrap(), None);
        assert_eq!(runner.get_raw_value("fields-date").unwrap(), None);
        assert_eq!(runner.get_value("date").unwrap(), Some(&FormValue::Date(date(2017, 7, 3))));
    }

    #[test]
    fn first_match_wins() {
        let xml = common::date_time_instance(
            "<fields-date>2017-07-01</fields-date><fields-date>2018-01-01</fields-date>",
        );
        let runner = Runner::with_builder(xml.as_bytes(), common::shared_builder()).unwrap();
        assert_eq!(
            runner.get_value("fields-date").unwrap(),
            Some(&FormValue::Date(date(2017, 7, 1)))
        );
    }

    #[test]
    fn whitespace_around_typed_literals_is_ignored() {
        let xml = common::date_time_instance("<fields-date>\n  2017-07-01\n</fields-date>");
        let runner = Runner::with_builder(xml.as_bytes(), common::shared_builder()).unwrap();
        assert_eq!(
            runner.get_value("fields-date").unwrap(),
            Some(&FormValue::Date(date(2017, 7, 1)))
        );
    }
}

// ============================================================================
// CONSTRUCTION TESTS
// ============================================================================

mod construction_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_xml_and_shared_builder_agree() {
        let from_xml = Runner::options(common::RUNNER_XML)
            .builder_xml(common::BUILDER_XML)
            .lang("en")
            .build()
            .unwrap();
        let shared = common::runner();

        assert_eq!(from_xml.to_value(), shared.to_value());
    }

    #[test]
    fn one_builder_many_runners() {
        let builder = common::shared_builder();
        let a = common::date_time_instance("<fields-date>2017-07-01</fields-date>");
        let b = common::date_time_instance("<fields-date>2018-01-01</fields-date>");

        let handles: Vec<_> = [a, b]
            .into_iter()
            .map(|xml| {
                let builder = Arc::clone(&builder);
                std::thread::spawn(move || {
                    let runner = Runner::with_builder(xml.as_bytes(), builder).unwrap();
                    let value = runner.get_value("fields-date").unwrap().cloned();
                    value
                })
            })
            .collect();
        let values: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(
            values,
            vec![
                Some(FormValue::Date(date(2017, 7, 1))),
                Some(FormValue::Date(date(2018, 1, 1))),
            ]
        );
        assert_eq!(Arc::strong_count(&builder), 1);
    }

    #[test]
    fn both_sources_conflict() {
        let result = Runner::options(common::RUNNER_XML)
            .builder(common::shared_builder())
            .builder_xml(common::BUILDER_XML)
            .build();
        assert!(matches!(result, Err(FormError::ConflictingSources)));
    }

    #[test]
    fn no_source_is_an_error() {
        let result = Runner::options(common::RUNNER_XML).build();
        assert!(matches!(result, Err(FormError::MissingSource)));
    }

    #[test]
    fn malformed_instance_is_rejected() {
        let result = Runner::with_builder(b"<form><open></form>", common::shared_builder());
        assert!(matches!(result, Err(FormError::Xml(_))));
    }

    #[test]
    fn runner_exposes_its_builder() {
        let runner = common::runner();
        assert_eq!(runner.builder().lang(), "en");
        let again = Runner::with_builder(common::RUNNER_XML, runner.shared_builder()).unwrap();
        assert_eq!(again.get_value("secret").unwrap(), Some(&FormValue::from("43")));
    }
}

// ============================================================================
// LIMITATION TESTS - one-level path strategy
// ============================================================================

mod limitation_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parentless_controls_never_resolve() {
        let runner = common::runner();
        for name in ["text-controls", "date-time-controls", "us-address"] {
            assert!(!runner.has_value(name), "{name}");
            assert_eq!(runner.get_value(name).unwrap(), None, "{name}");
        }

        // Even when the instance holds a direct child of <form> with that name
        let builder = Arc::new(Builder::new(common::BUILDER_XML, "en").unwrap());
        let runner = Runner::with_builder(b"<form><us-address>x</us-address></form>", builder).unwrap();
        assert_eq!(runner.get_value("us-address").unwrap(), None);
    }

    #[test]
    fn repeated_content_is_not_reached() {
        let runner = common::runner();
        // Parent bind is the repeat iteration, not a child of <form>
        assert_eq!(runner.get_value("image-attachment").unwrap(), None);
        assert_eq!(
            runner.builder().instance_path("image-attachment").unwrap().unwrap().to_string(),
            "//form/image-attachments-iteration/image-attachment"
        );
    }

    #[test]
    fn set_value_does_not_write() {
        let runner = common::runner();
        runner.set_value("input", FormValue::from("Changed"));
        assert_eq!(runner.get_raw_value("input").unwrap(), Some("Michelle Obama"));
    }
}
