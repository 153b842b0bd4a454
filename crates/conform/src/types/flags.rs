use std::fmt;

use serde::{Deserialize, Serialize};

/// Flow-control flags attached to a single rule.
///
/// Flags are independent of one another; any combination is legal. In rule
/// text they appear as a prefix before the function path:
///
/// | Text | Flag              |
/// |------|-------------------|
/// | `~`  | `negate`          |
/// | `?`  | `optional`        |
/// | `!`  | `break_field`     |
/// | `!!` | `break_all`       |
/// | `&`  | `continuity`      |
/// | `&&` | `full_continuity` |
///
/// # Example
///
/// ```
/// use conform::FlagSet;
/// use conform::parser::parse_flags;
///
/// let flags = parse_flags("?!");
/// assert_eq!(flags, FlagSet { optional: true, break_field: true, ..FlagSet::default() });
/// assert_eq!(flags.to_string(), "?!");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagSet {
    /// A failure of the conformer counts as success, and success as failure.
    pub negate: bool,
    /// A failure is not recorded as an error.
    pub optional: bool,
    /// A failure stops the remaining rules of this field.
    #[serde(rename = "break")]
    pub break_field: bool,
    /// A failure stops the whole session.
    pub break_all: bool,
    /// Skip the rest of the field once the field has an error.
    pub continuity: bool,
    /// Skip the rest of the field once any field has an error.
    pub full_continuity: bool,
}

impl FlagSet {
    /// Returns true if no flag is set.
    pub fn is_empty(&self) -> bool {
        *self == FlagSet::default()
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negate {
            f.write_str("~")?;
        }
        if self.optional {
            f.write_str("?")?;
        }
        if self.break_all {
            f.write_str("!!")?;
        }
        if self.break_field {
            f.write_str("!")?;
        }
        if self.full_continuity {
            f.write_str("&&")?;
        }
        if self.continuity {
            f.write_str("&")?;
        }
        Ok(())
    }
}
