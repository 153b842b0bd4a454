//! Rule text parser using winnow.
//!
//! Splits one rule into its flag prefix, function path and raw parameter
//! string. The flag prefix is the leading run of characters outside
//! `[a-zA-Z_]`; the function path runs up to the first `:`; everything after
//! that `:` is the parameter string.

use winnow::combinator::{opt, preceded};
use winnow::prelude::*;
use winnow::token::take_while;

use super::error::ParseError;

/// The raw parts of a textual rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleText<'a> {
    pub flag_string: &'a str,
    pub fn_path: &'a str,
    /// `None` when the rule has no `:`.
    pub params_string: Option<&'a str>,
}

/// Parse one textual rule into its raw parts.
///
/// # Errors
///
/// Returns an error if the text is empty or holds nothing but flag
/// characters.
pub fn parse_rule_text(text: &str) -> Result<RuleText<'_>, ParseError> {
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut remaining = text;
    rule_text(&mut remaining).map_err(|_| ParseError::MissingPath {
        column: text.len() - remaining.len() + 1,
    })
}

/// Split a parameter string on `,`. A missing or empty string yields no
/// parameters.
pub fn parse_params(params_string: Option<&str>) -> Vec<String> {
    match params_string {
        Some(s) if !s.is_empty() => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

fn rule_text<'i>(input: &mut &'i str) -> ModalResult<RuleText<'i>> {
    let flag_string = take_while(0.., |c: char| !is_path_start(c)).parse_next(input)?;
    let fn_path = take_while(1.., |c: char| c != ':').parse_next(input)?;
    let params_string = opt(preceded(':', take_while(0.., |_: char| true))).parse_next(input)?;
    Ok(RuleText {
        flag_string,
        fn_path,
        params_string,
    })
}

fn is_path_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}
