//! Flag prefix decoding.

use crate::types::FlagSet;

/// Decode a flag prefix such as `"~?&&"` into a [`FlagSet`].
///
/// The two-character tokens `!!` and `&&` are consumed first (one occurrence
/// each), then every remaining character is read on its own. Characters that
/// are not flags are ignored.
pub fn parse_flags(flag_string: &str) -> FlagSet {
    let mut flags = FlagSet::default();
    if flag_string.is_empty() {
        return flags;
    }

    let mut remaining = flag_string.to_string();
    if let Some(stripped) = take_token(&remaining, "!!") {
        flags.break_all = true;
        remaining = stripped;
    }
    if let Some(stripped) = take_token(&remaining, "&&") {
        flags.full_continuity = true;
        remaining = stripped;
    }

    for c in remaining.chars() {
        match c {
            '?' => flags.optional = true,
            '!' => flags.break_field = true,
            '&' => flags.continuity = true,
            '~' => flags.negate = true,
            _ => {}
        }
    }
    flags
}

/// Remove the first occurrence of `token`, if present.
fn take_token(s: &str, token: &str) -> Option<String> {
    s.contains(token).then(|| s.replacen(token, "", 1))
}
