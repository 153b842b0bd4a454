pub mod compiler;
pub mod engine;
pub mod parser;
pub mod types;

pub use compiler::{compile_rule, compile_rules, field_rules_from_json, rules_from_json};
pub use engine::{
    ConformContext, ConformError, ConformSession, Conformer, ConformerRegistry, ErrorRecord,
    FailureCause, FieldOutcome, RuleFailure, StandardizedError, standardise_errors,
};
pub use types::{CompiledRule, FieldRuleMap, FlagSet, FnRef, RuleSource, Rules};

// Re-exported so conformer implementations use the same macro version.
pub use async_trait::async_trait;

/// Creates a [`FieldRuleMap`] from field-to-rules pairs.
///
/// Rules are converted via `Into<Rules>`, so you can pass rule text or a
/// `Vec<RuleSource>` directly. Fields keep the order they are written in.
///
/// # Example
///
/// ```
/// use conform::{RuleSource, rules};
///
/// let r = rules! {
///     "name" => "trim | ?!non_empty",
///     "age" => vec![RuleSource::positional("int.between", [0, 150])],
/// };
/// assert_eq!(r.len(), 2);
/// assert_eq!(r.get_index(0).map(|(field, _)| field.as_str()), Some("name"));
/// ```
#[macro_export]
macro_rules! rules {
    {} => {
        $crate::FieldRuleMap::new()
    };
    { $($field:expr => $rules:expr),+ $(,)? } => {
        {
            let mut map = $crate::FieldRuleMap::new();
            $(
                map.insert($field.to_string(), ::std::convert::Into::<$crate::Rules>::into($rules));
            )+
            map
        }
    };
}
