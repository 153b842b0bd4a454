//! Tests for rule text splitting.

use conform::parser::{ParseError, RuleText, parse_params, parse_rule_text};

#[test]
fn test_path_only() {
    assert_eq!(
        parse_rule_text("a.string").unwrap(),
        RuleText {
            flag_string: "",
            fn_path: "a.string",
            params_string: None,
        }
    );
}

#[test]
fn test_flags_path_and_params() {
    assert_eq!(
        parse_rule_text("?!a.above:10,20").unwrap(),
        RuleText {
            flag_string: "?!",
            fn_path: "a.above",
            params_string: Some("10,20"),
        }
    );
}

#[test]
fn test_underscore_starts_path() {
    let parsed = parse_rule_text("~_private").unwrap();
    assert_eq!(parsed.flag_string, "~");
    assert_eq!(parsed.fn_path, "_private");
}

#[test]
fn test_params_split_on_first_colon_only() {
    let parsed = parse_rule_text("time.format:HH:mm").unwrap();
    assert_eq!(parsed.fn_path, "time.format");
    assert_eq!(parsed.params_string, Some("HH:mm"));
}

#[test]
fn test_empty_params_string() {
    let parsed = parse_rule_text("a.b:").unwrap();
    assert_eq!(parsed.params_string, Some(""));
    assert!(parse_params(parsed.params_string).is_empty());
}

#[test]
fn test_path_may_contain_flag_characters_after_start() {
    let parsed = parse_rule_text("a!b").unwrap();
    assert_eq!(parsed.flag_string, "");
    assert_eq!(parsed.fn_path, "a!b");
}

#[test]
fn test_empty_text_is_malformed() {
    assert_eq!(parse_rule_text(""), Err(ParseError::Empty));
}

#[test]
fn test_flags_without_path_are_malformed() {
    let err = parse_rule_text("?!").unwrap_err();
    assert!(matches!(err, ParseError::MissingPath { .. }));
}

#[test]
fn test_parse_params() {
    assert_eq!(parse_params(None), Vec::<String>::new());
    assert_eq!(parse_params(Some("10")), vec!["10"]);
    assert_eq!(parse_params(Some("10,20")), vec!["10", "20"]);
    assert_eq!(parse_params(Some("1,,2")), vec!["1", "", "2"]);
}
