//! Unit tests for configuration defaults and the attribute table.

use rstest::rstest;

use crate::{AttributeTable, Config, LogFormat};

#[rstest]
#[case::lower("server", true)]
#[case::upper("SERVER", true)]
#[case::padded(" Server ", true)]
#[case::client("client", false)]
#[case::unknown("browser", false)]
fn server_targets_compare_case_insensitively(#[case] value: &str, #[case] expected: bool) {
    assert_eq!(AttributeTable::default().is_server_target(value), expected);
}

#[rstest]
#[case::javascript("JavaScript", true, false)]
#[case::ampscript("AMPscript", false, true)]
#[case::vbscript("vbscript", false, false)]
fn languages_split_into_supported_and_rejected(
    #[case] value: &str,
    #[case] supported: bool,
    #[case] rejected: bool,
) {
    let table = AttributeTable::default();
    assert_eq!(table.is_supported_language(value), supported);
    assert_eq!(table.is_rejected_language(value), rejected);
}

#[rstest]
#[case::post("POST", true)]
#[case::get("get", true)]
#[case::put("put", false)]
fn context_types_accept_post_and_get(#[case] value: &str, #[case] expected: bool) {
    assert_eq!(AttributeTable::default().is_context_type(value), expected);
}

#[test]
fn canonical_language_falls_back_when_list_is_empty() {
    let table = AttributeTable {
        languages: Vec::new(),
        ..AttributeTable::default()
    };
    assert_eq!(table.canonical_language(), "javascript");
}

#[test]
fn config_defaults_are_quiet_and_compact() {
    let config = Config::default();
    assert_eq!(config.log_filter(), "warn");
    assert_eq!(config.log_format(), LogFormat::Compact);
    assert!(config.report_undeclared());
    assert!(config.globals().is_empty());
    assert_eq!(config.attributes(), &AttributeTable::default());
}

#[rstest]
#[case::json("json", LogFormat::Json)]
#[case::compact("COMPACT", LogFormat::Compact)]
fn log_format_parses_case_insensitively(#[case] input: &str, #[case] expected: LogFormat) {
    assert_eq!(input.parse::<LogFormat>(), Ok(expected));
}

#[rstest]
#[case::json(LogFormat::Json, "json")]
#[case::compact(LogFormat::Compact, "compact")]
fn log_format_displays_its_config_spelling(#[case] format: LogFormat, #[case] expected: &str) {
    assert_eq!(format.to_string(), expected);
    assert_eq!(
        serde_json::to_string(&format).expect("serialise"),
        format!("\"{expected}\"")
    );
}

#[test]
fn unknown_log_format_is_rejected() {
    assert!("pretty".parse::<LogFormat>().is_err());
}
