//! Per-field pipeline executor.
//!
//! Threads one field's value through its compiled rules, one rule at a time,
//! applying the flag semantics:
//! - `&` / `&&` skip the rest of the field once the field / session has an
//!   error
//! - `~` turns conformer failure into success and success into failure
//! - `?` keeps a failure out of the error lists
//! - `!` / `!!` stop the field / session after a failure
//!
//! A failed step never changes the value: the next rule receives the last
//! good value.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::engine::{ConformContext, ConformError, ConformerRegistry, ErrorRecord, FailureCause};
use crate::types::{CompiledRule, FnRef, lookup};

/// How a field's pipeline ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    /// Every rule ran; holds the conformed value.
    Complete(Value),
    /// The field stopped early on `!` or a continuity gate; holds the last
    /// good value.
    FieldBreak(Value),
    /// A `!!` rule failed; the whole session stops. Holds the last good value.
    SessionBreak(Value),
}

impl FieldOutcome {
    pub fn value(&self) -> &Value {
        match self {
            FieldOutcome::Complete(value)
            | FieldOutcome::FieldBreak(value)
            | FieldOutcome::SessionBreak(value) => value,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            FieldOutcome::Complete(value)
            | FieldOutcome::FieldBreak(value)
            | FieldOutcome::SessionBreak(value) => value,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, FieldOutcome::Complete(_))
    }
}

/// Result of a single rule step.
enum Step {
    Continue(Value),
    FieldBreak(Value),
    SessionBreak(Value),
}

/// Executes one field's rules against the session state it borrows.
pub(crate) struct Pipeline<'s> {
    pub field: &'s str,
    pub registry: &'s ConformerRegistry,
    pub input: &'s Value,
    pub output: &'s mut Map<String, Value>,
    pub errors: &'s mut Vec<ErrorRecord>,
    pub field_errors: &'s mut IndexMap<String, Vec<ErrorRecord>>,
}

impl Pipeline<'_> {
    /// Run `rules` in order against the field's input value.
    ///
    /// # Errors
    ///
    /// Returns [`ConformError::UnknownConformer`] if a rule's path does not
    /// resolve. Rule failures are recorded, not returned.
    pub async fn run(mut self, rules: &[CompiledRule]) -> Result<FieldOutcome, ConformError> {
        let mut value = lookup(self.input, self.field)
            .cloned()
            .unwrap_or(Value::Null);
        self.field_errors.entry(self.field.to_string()).or_default();

        for rule in rules {
            if let Some(gate) = self.continuity_gate(rule) {
                trace!(field = self.field, rule = %rule, gate, "skipping remaining rules");
                return Ok(FieldOutcome::FieldBreak(value));
            }
            value = match self.apply(rule, value).await? {
                Step::Continue(value) => value,
                Step::FieldBreak(value) => {
                    debug!(field = self.field, rule = %rule, "field break");
                    return Ok(FieldOutcome::FieldBreak(value));
                }
                Step::SessionBreak(value) => {
                    debug!(field = self.field, rule = %rule, "session break");
                    return Ok(FieldOutcome::SessionBreak(value));
                }
            };
        }
        Ok(FieldOutcome::Complete(value))
    }

    /// Name of the continuity flag that stops this rule, if any.
    fn continuity_gate(&self, rule: &CompiledRule) -> Option<&'static str> {
        let field_has_errors = self
            .field_errors
            .get(self.field)
            .is_some_and(|errors| !errors.is_empty());
        if rule.flags.continuity && field_has_errors {
            Some("continuity")
        } else if rule.flags.full_continuity && !self.errors.is_empty() {
            Some("full_continuity")
        } else {
            None
        }
    }

    async fn apply(&mut self, rule: &CompiledRule, value: Value) -> Result<Step, ConformError> {
        let conformer = match &rule.target {
            FnRef::Path(path) => self.registry.resolve(path)?,
            FnRef::Inline(conformer) => Arc::clone(conformer),
        };

        trace!(field = self.field, rule = %rule, "applying rule");
        let result = {
            let mut ctx = ConformContext::new(
                self.field,
                self.input,
                self.output,
                self.errors,
                self.field_errors,
            );
            conformer
                .conform(value.clone(), &rule.params, &mut ctx)
                .await
        };

        let cause = match result {
            Ok(conformed) if !rule.flags.negate => return Ok(Step::Continue(conformed)),
            Ok(_) => FailureCause::Negated,
            Err(failure) if rule.flags.negate => {
                trace!(field = self.field, rule = %rule, %failure, "negated rule failed");
                return Ok(Step::Continue(value));
            }
            Err(failure) => FailureCause::Rule(failure),
        };
        Ok(self.fail(rule, cause, value))
    }

    fn fail(&mut self, rule: &CompiledRule, cause: FailureCause, value: Value) -> Step {
        if !rule.flags.optional {
            debug!(field = self.field, rule = %rule, %cause, "rule failed");
            let record = ErrorRecord {
                cause,
                field: self.field.to_string(),
                rule: rule.clone(),
            };
            self.field_errors
                .entry(self.field.to_string())
                .or_default()
                .push(record.clone());
            self.errors.push(record);
        }

        if rule.flags.break_field {
            Step::FieldBreak(value)
        } else if rule.flags.break_all {
            Step::SessionBreak(value)
        } else {
            Step::Continue(value)
        }
    }
}
