//! Data types shared by the parser, compiler and engine.

mod flags;
mod path;
mod rule;
mod source;

pub use flags::FlagSet;
pub use path::lookup;
pub use rule::{CompiledRule, FnRef};
pub use source::{FieldRuleMap, RuleSource, Rules};
