//! Conformance sessions.
//!
//! A session owns one input record and runs field pipelines against it,
//! strictly one field after another in declaration order. Later fields can
//! read the output of earlier ones through the context.

use std::sync::Arc;

use bon::Builder;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use crate::compiler::{compile_rules, field_rules_from_json};
use crate::engine::pipeline::{FieldOutcome, Pipeline};
use crate::engine::{
    ConformError, Conformer, ConformerRegistry, ErrorRecord, StandardizedError, standardise_errors,
};
use crate::types::{FieldRuleMap, Rules};

/// One conformance run over an input record.
///
/// A resolved call with errors recorded is a normal outcome: check
/// [`errors`](ConformSession::errors) or
/// [`field_errors`](ConformSession::field_errors) after each call.
///
/// # Example
///
/// ```
/// use conform::{ConformSession, ConformerRegistry, rules};
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut registry = ConformerRegistry::new();
/// registry.register_fn("trim", |v, _, _| Ok(json!(v.as_str().unwrap_or_default().trim())));
/// registry.register_predicate("non_empty", |v, _| v.as_str().is_some_and(|s| !s.is_empty()));
///
/// let mut session = ConformSession::builder()
///     .input(json!({"name": "  moe ", "nick": "   "}))
///     .conformers(registry)
///     .build();
///
/// let output = session
///     .get(&rules! {
///         "name" => "trim | non_empty",
///         "nick" => "trim | !non_empty",
///     })
///     .await
///     .unwrap();
///
/// assert_eq!(output.get("name"), Some(&json!("moe")));
/// assert!(output.get("nick").is_none());
/// assert_eq!(session.errors_for("nick").len(), 1);
/// # }
/// ```
#[derive(Builder)]
pub struct ConformSession {
    /// Snapshot of the record being conformed.
    #[builder(default = Value::Object(Map::new()))]
    input: Value,

    /// Conformers addressed by rule paths.
    #[builder(default, into)]
    conformers: Arc<ConformerRegistry>,

    #[builder(skip)]
    output: Map<String, Value>,

    #[builder(skip)]
    errors: Vec<ErrorRecord>,

    #[builder(skip)]
    field_errors: IndexMap<String, Vec<ErrorRecord>>,
}

impl Default for ConformSession {
    fn default() -> Self {
        ConformSession::builder().build()
    }
}

impl ConformSession {
    /// Create a session over `input` with an empty registry.
    pub fn new(input: Value) -> Self {
        ConformSession::builder().input(input).build()
    }

    // =========================================================================
    // Conformance
    // =========================================================================

    /// Conform every field of `rules`, in declaration order.
    ///
    /// Resets the session first. Returns the output record, which is partial
    /// when a `!!` rule stopped the session. Fields stopped by `!` or a
    /// continuity gate are absent from the output.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed rules or unresolvable paths. Fields
    /// processed before the bad rule keep their output and errors.
    pub async fn get(&mut self, rules: &FieldRuleMap) -> Result<Map<String, Value>, ConformError> {
        self.reset();
        debug!(fields = rules.len(), "conforming record");

        for (field, field_rules) in rules {
            match self.field_rules(field, field_rules).await? {
                FieldOutcome::Complete(value) => {
                    self.output.insert(field.clone(), value);
                }
                FieldOutcome::FieldBreak(_) => {}
                FieldOutcome::SessionBreak(_) => break,
            }
        }

        debug!(errors = self.errors.len(), "conformed record");
        Ok(self.output.clone())
    }

    /// Like [`get`](ConformSession::get), with the rule map given as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConformError::NonConformingRule`] if `rules` is not an
    /// object of rule strings and rule arrays, and otherwise as `get`.
    pub async fn get_json(&mut self, rules: &Value) -> Result<Map<String, Value>, ConformError> {
        let rules = field_rules_from_json(rules)?;
        self.get(&rules).await
    }

    /// Run one field's rules without resetting the session.
    ///
    /// The caller decides what to do with the outcome; nothing is written to
    /// the output record.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed rules or unresolvable paths.
    pub async fn field_rules(
        &mut self,
        field: &str,
        rules: &Rules,
    ) -> Result<FieldOutcome, ConformError> {
        let compiled = compile_rules(rules)?;
        let registry = Arc::clone(&self.conformers);
        Pipeline {
            field,
            registry: &registry,
            input: &self.input,
            output: &mut self.output,
            errors: &mut self.errors,
            field_errors: &mut self.field_errors,
        }
        .run(&compiled)
        .await
    }

    /// Clear the output and every recorded error.
    pub fn reset(&mut self) {
        self.output = Map::new();
        self.errors.clear();
        self.field_errors.clear();
    }

    // =========================================================================
    // Registry
    // =========================================================================

    pub fn conformers(&self) -> &ConformerRegistry {
        &self.conformers
    }

    /// Add a conformer to this session's registry.
    ///
    /// A registry shared with other sessions is copied first, so they do not
    /// see the addition.
    pub fn add_conformer(&mut self, path: &str, conformer: Arc<dyn Conformer>) {
        Arc::make_mut(&mut self.conformers).insert(path, conformer);
    }

    // =========================================================================
    // Results
    // =========================================================================

    pub fn input(&self) -> &Value {
        &self.input
    }

    /// The output of the last call.
    pub fn output(&self) -> &Map<String, Value> {
        &self.output
    }

    /// Every recorded error, in the order recorded.
    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    /// Recorded errors keyed by field.
    ///
    /// Every field whose pipeline started has an entry, possibly empty.
    pub fn field_errors(&self) -> &IndexMap<String, Vec<ErrorRecord>> {
        &self.field_errors
    }

    /// Recorded errors for one field.
    pub fn errors_for(&self, field: &str) -> &[ErrorRecord] {
        self.field_errors.get(field).map_or(&[], Vec::as_slice)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The session's errors in caller-facing form.
    pub fn standardise_errors(&self) -> Vec<StandardizedError> {
        standardise_errors(&self.errors)
    }
}
