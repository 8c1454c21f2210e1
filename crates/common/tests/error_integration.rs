//! Integration tests for `chronoval_common::error`.
//!
//! These suites validate classification, display payloads, and module error
//! delegation to ensure callers receive consistent failure semantics.

use chronoval_common::error::{CommonError, CommonResult, ErrorClassification, ErrorSeverity};
use chronoval_common::time::{TimeConfig, TimeError, ZoneCalendar};

/// Validates that `CommonError` classification surfaces the expected
/// retryable, severity, and criticality combinations for each variant.
#[test]
fn classification_matrix_matches_expected_contract() {
    let cases = vec![
        (CommonError::config("missing file"), "config"),
        (CommonError::serialization_format("TOML", "unexpected token"), "serialization"),
        (CommonError::validation_with_value("calendar.zone", "unknown zone", "mars"), "validation"),
    ];

    for (err, label) in cases {
        assert!(!err.is_retryable(), "{label} should not be retryable");
        assert_eq!(err.severity(), ErrorSeverity::Error);
        assert!(!err.is_critical());
        assert!(err.retry_after().is_none());
        assert_eq!(err.error_type_name(), label);
    }
}

/// Validates that module errors delegate classification to the wrapped
/// `CommonError` and keep their own for local variants.
#[test]
fn time_error_delegates_to_common_error() {
    let wrapped: TimeError = CommonError::validation("calendar.zone", "bad zone").into();
    assert_eq!(wrapped.severity(), ErrorSeverity::Error);
    assert_eq!(wrapped.to_string(), "Validation error for field 'calendar.zone': bad zone");

    let overflow = TimeError::overflow("addition");
    assert_eq!(overflow.to_string(), "Seconds overflow during addition");
    assert!(!overflow.is_critical());

    let out_of_range = TimeError::OutOfRange { seconds: i64::MAX };
    assert_eq!(out_of_range.severity(), ErrorSeverity::Warning);
    assert!(out_of_range.severity() < ErrorSeverity::Critical);
}

/// Validates that configuration errors propagate through `?` with the field
/// that caused them.
#[test]
fn config_errors_propagate_with_context() {
    fn load_zone(raw: &str) -> CommonResult<ZoneCalendar> {
        let zone = raw.parse::<ZoneCalendar>()?;
        Ok(zone)
    }

    let err = load_zone("+5:30").unwrap_err();
    match &err {
        CommonError::Validation { field, value, .. } => {
            assert_eq!(field, "calendar.zone");
            assert_eq!(value.as_deref(), Some("+5:30"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(err.to_string().contains("calendar.zone"));

    let toml_err = TimeConfig::from_toml_str("[display]\nshow_sub_second = \"maybe\"\n").unwrap_err();
    assert!(matches!(
        toml_err,
        CommonError::Serialization { format: Some(ref f), .. } if f == "TOML"
    ));
}
