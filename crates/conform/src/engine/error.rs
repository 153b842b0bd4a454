//! Error types for the conformance engine.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use bon::bon;
use serde_json::Value;
use strsim::levenshtein;
use thiserror::Error;

use crate::parser::ParseError;
use crate::types::CompiledRule;

/// An error that aborts a conformance call.
///
/// These indicate a mistake in the rules or the registry, not bad input data.
/// Bad input is reported through [`ErrorRecord`]s instead.
#[derive(Debug, Error)]
pub enum ConformError {
    /// Rule text could not be split into flags, path and parameters.
    #[error("rule text not conforming: \"{text}\"")]
    MalformedRule {
        text: String,
        #[source]
        source: ParseError,
    },

    /// A rule was given in a shape the compiler does not accept.
    #[error("non conforming rule: {rule}")]
    NonConformingRule { rule: String },

    /// A rule names a path that is missing from the registry or is not a
    /// conformer.
    #[error("unknown conformer '{path}'{}", format_suggestions(suggestions))]
    UnknownConformer {
        path: String,
        suggestions: Vec<String>,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute typo suggestions using Levenshtein distance.
///
/// - distance <= 1 for names <= 3 chars
/// - distance <= 2 for longer names
/// - at most 3 suggestions, closest first
pub fn compute_suggestions(name: &str, available: &[String]) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &String)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            (dist > 0 && dist <= max_distance).then_some((dist, candidate))
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, s)| s.clone())
        .collect()
}

/// The failure a conformer returns when a value does not conform.
///
/// Every part is optional. Whatever is set here takes precedence over the
/// defaults derived from the rule when errors are standardized. The `note`
/// is free-form detail that is not shown to callers.
///
/// # Example
///
/// ```
/// use conform::RuleFailure;
///
/// let failure = RuleFailure::builder()
///     .message("must be at least 10")
///     .error_type("too_small")
///     .build();
/// assert_eq!(failure.to_string(), "must be at least 10");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleFailure {
    detail: Box<FailureDetail>,
}

#[derive(Debug, Clone, Default)]
struct FailureDetail {
    message: Option<String>,
    error_type: Option<String>,
    fields: Option<Vec<String>>,
    params: Option<Vec<Value>>,
    note: Option<String>,
    source: Option<Arc<dyn StdError + Send + Sync>>,
}

#[bon]
impl RuleFailure {
    /// Build a failure from all of its parts. Prefer [`RuleFailure::builder`].
    #[builder(start_fn = builder, finish_fn = build)]
    pub fn from_parts(
        #[builder(into)] message: Option<String>,
        #[builder(into)] error_type: Option<String>,
        fields: Option<Vec<String>>,
        params: Option<Vec<Value>>,
        #[builder(into)] note: Option<String>,
        source: Option<Arc<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            detail: Box::new(FailureDetail {
                message,
                error_type,
                fields,
                params,
                note,
                source,
            }),
        }
    }

    /// A failure carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::builder().message(message).build()
    }

    /// Wrap an arbitrary error, using its display text as the message.
    pub fn from_error(error: impl StdError + Send + Sync + 'static) -> Self {
        Self::builder()
            .message(error.to_string())
            .source(Arc::new(error))
            .build()
    }

    pub fn message(&self) -> Option<&str> {
        self.detail.message.as_deref()
    }

    pub fn error_type(&self) -> Option<&str> {
        self.detail.error_type.as_deref()
    }

    pub fn fields(&self) -> Option<&[String]> {
        self.detail.fields.as_deref()
    }

    pub fn params(&self) -> Option<&[Value]> {
        self.detail.params.as_deref()
    }

    pub fn note(&self) -> Option<&str> {
        self.detail.note.as_deref()
    }
}

impl fmt::Display for RuleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = &self.detail;
        match (&detail.message, &detail.error_type, &detail.note) {
            (Some(message), _, _) => f.write_str(message),
            (None, Some(error_type), _) => f.write_str(error_type),
            (None, None, Some(note)) => f.write_str(note),
            (None, None, None) => f.write_str("conformer failed"),
        }
    }
}

impl StdError for RuleFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.detail
            .source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}

/// Why a rule step was recorded as failed.
#[derive(Debug, Clone)]
pub enum FailureCause {
    /// The conformer itself failed.
    Rule(RuleFailure),
    /// A negated rule's conformer succeeded.
    Negated,
}

impl FailureCause {
    pub fn is_negated(&self) -> bool {
        matches!(self, FailureCause::Negated)
    }
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Rule(failure) => write!(f, "{failure}"),
            FailureCause::Negated => f.write_str("negated rule succeeded"),
        }
    }
}

/// A failed rule step, captured where it failed.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub cause: FailureCause,
    pub field: String,
    pub rule: CompiledRule,
}
