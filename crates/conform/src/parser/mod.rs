//! Parsers for textual rules.
//!
//! A textual rule has the shape `[<flags>]<fn_path>[:<param>,<param>...]`.
//! [`parse_rule_text`] splits it into its three raw parts, [`parse_flags`]
//! decodes the flag prefix and [`parse_params`] splits the parameter list.

pub mod error;
mod flags;
mod rule_text;

pub use error::ParseError;
pub use flags::parse_flags;
pub use rule_text::{RuleText, parse_params, parse_rule_text};
