//! Execution context handed to every conformer call.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::engine::ErrorRecord;
use crate::types::lookup;

/// The session as seen from inside a conformer.
///
/// Everything is read-only except the output record, which may only grow or
/// have entries overwritten. Fields later in declaration order see entries
/// written by earlier fields and by conformers through [`set_output`].
///
/// [`set_output`]: ConformContext::set_output
pub struct ConformContext<'a> {
    field: &'a str,
    input: &'a Value,
    output: &'a mut Map<String, Value>,
    errors: &'a [ErrorRecord],
    field_errors: &'a IndexMap<String, Vec<ErrorRecord>>,
}

impl<'a> ConformContext<'a> {
    pub(crate) fn new(
        field: &'a str,
        input: &'a Value,
        output: &'a mut Map<String, Value>,
        errors: &'a [ErrorRecord],
        field_errors: &'a IndexMap<String, Vec<ErrorRecord>>,
    ) -> Self {
        Self {
            field,
            input,
            output,
            errors,
            field_errors,
        }
    }

    /// The field whose pipeline is running.
    pub fn field(&self) -> &str {
        self.field
    }

    /// The session's input snapshot.
    pub fn input(&self) -> &Value {
        self.input
    }

    /// Read another input field by name or dotted path.
    pub fn input_field(&self, path: &str) -> Option<&Value> {
        lookup(self.input, path)
    }

    /// The output conformed so far.
    pub fn output(&self) -> &Map<String, Value> {
        self.output
    }

    /// Insert or overwrite an output entry, returning the previous value.
    pub fn set_output(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.output.insert(key.into(), value)
    }

    /// Every error recorded in the session so far.
    pub fn errors(&self) -> &[ErrorRecord] {
        self.errors
    }

    /// Errors recorded so far for `field`.
    pub fn field_errors(&self, field: &str) -> &[ErrorRecord] {
        self.field_errors.get(field).map_or(&[], Vec::as_slice)
    }
}
