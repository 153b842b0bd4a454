use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::engine::Conformer;
use crate::types::FnRef;

/// One rule as written by the caller, before compilation.
#[derive(Debug, Clone)]
pub enum RuleSource {
    /// `[<flags>]<fn_path>[:<param>,<param>...]`
    Text(String),
    /// Flags and path parsed from `head`; parameters given verbatim.
    ///
    /// Any `:params` suffix in `head` is ignored in favor of `params`.
    Positional { head: String, params: Vec<Value> },
    /// Flags parsed from `flags`; the target used as-is.
    Inline {
        flags: String,
        target: FnRef,
        params: Vec<Value>,
    },
}

impl RuleSource {
    pub fn positional(
        head: impl Into<String>,
        params: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Self {
        RuleSource::Positional {
            head: head.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// A rule calling `conformer` directly instead of a registry entry.
    pub fn inline(
        flags: impl Into<String>,
        conformer: Arc<dyn Conformer>,
        params: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Self {
        RuleSource::Inline {
            flags: flags.into(),
            target: FnRef::Inline(conformer),
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&str> for RuleSource {
    fn from(text: &str) -> Self {
        RuleSource::Text(text.to_string())
    }
}

impl From<String> for RuleSource {
    fn from(text: String) -> Self {
        RuleSource::Text(text)
    }
}

/// The rules declared for one field.
#[derive(Debug, Clone)]
pub enum Rules {
    /// Pipe-delimited rule text: `"a | ?b:1 | ~c"`.
    Text(String),
    /// Individually written rules, in execution order.
    List(Vec<RuleSource>),
}

impl From<&str> for Rules {
    fn from(text: &str) -> Self {
        Rules::Text(text.to_string())
    }
}

impl From<String> for Rules {
    fn from(text: String) -> Self {
        Rules::Text(text)
    }
}

impl From<Vec<RuleSource>> for Rules {
    fn from(sources: Vec<RuleSource>) -> Self {
        Rules::List(sources)
    }
}

impl From<RuleSource> for Rules {
    fn from(source: RuleSource) -> Self {
        Rules::List(vec![source])
    }
}

/// Field name to rules, in declaration (and execution) order.
pub type FieldRuleMap = IndexMap<String, Rules>;
