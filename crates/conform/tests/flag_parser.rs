//! Tests for flag prefix decoding.

use conform::FlagSet;
use conform::parser::parse_flags;

// =============================================================================
// Single flags
// =============================================================================

#[test]
fn test_empty_flags() {
    assert_eq!(parse_flags(""), FlagSet::default());
    assert!(parse_flags("").is_empty());
}

#[test]
fn test_each_single_flag() {
    assert!(parse_flags("~").negate);
    assert!(parse_flags("?").optional);
    assert!(parse_flags("!").break_field);
    assert!(parse_flags("&").continuity);
}

#[test]
fn test_double_flags() {
    assert_eq!(
        parse_flags("!!"),
        FlagSet {
            break_all: true,
            ..FlagSet::default()
        }
    );
    assert_eq!(
        parse_flags("&&"),
        FlagSet {
            full_continuity: true,
            ..FlagSet::default()
        }
    );
}

// =============================================================================
// Combinations
// =============================================================================

#[test]
fn test_optional_break() {
    assert_eq!(
        parse_flags("?!"),
        FlagSet {
            optional: true,
            break_field: true,
            ..FlagSet::default()
        }
    );
}

#[test]
fn test_negate_optional_full_continuity() {
    assert_eq!(
        parse_flags("~?&&"),
        FlagSet {
            negate: true,
            optional: true,
            full_continuity: true,
            ..FlagSet::default()
        }
    );
}

#[test]
fn test_order_is_irrelevant() {
    assert_eq!(parse_flags("&&?~"), parse_flags("~?&&"));
    assert_eq!(parse_flags("!?"), parse_flags("?!"));
}

#[test]
fn test_unknown_characters_ignored() {
    assert_eq!(
        parse_flags("#?% "),
        FlagSet {
            optional: true,
            ..FlagSet::default()
        }
    );
    assert!(parse_flags("123").is_empty());
}

// =============================================================================
// Adjacent and overlapping flag characters
// =============================================================================

#[test]
fn test_triple_bang_is_break_all_and_break() {
    assert_eq!(
        parse_flags("!!!"),
        FlagSet {
            break_all: true,
            break_field: true,
            ..FlagSet::default()
        }
    );
}

#[test]
fn test_quadruple_bang_consumes_one_token() {
    assert_eq!(parse_flags("!!!!"), parse_flags("!!!"));
}

#[test]
fn test_triple_ampersand_is_full_continuity_and_continuity() {
    assert_eq!(
        parse_flags("&&&"),
        FlagSet {
            full_continuity: true,
            continuity: true,
            ..FlagSet::default()
        }
    );
}

#[test]
fn test_separated_bangs_are_not_break_all() {
    assert_eq!(
        parse_flags("!?!"),
        FlagSet {
            optional: true,
            break_field: true,
            ..FlagSet::default()
        }
    );
}

#[test]
fn test_all_flags() {
    let flags = parse_flags("~?!!!&&&");
    assert!(flags.negate && flags.optional && flags.break_field);
    assert!(flags.break_all && flags.continuity && flags.full_continuity);
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn test_display_reparses_to_same_flags() {
    for text in ["", "~", "?!", "!!", "!!!", "&&&", "~?&&", "~?!!!&&&"] {
        let flags = parse_flags(text);
        assert_eq!(parse_flags(&flags.to_string()), flags, "flags {text:?}");
    }
}
