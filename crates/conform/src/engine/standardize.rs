//! Caller-facing error shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::{ErrorRecord, FailureCause};

/// An error record reduced to what a caller needs, e.g. for an HTTP body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardizedError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub fields: Vec<String>,
    pub message: String,
    pub params: Vec<Value>,
}

/// Standardize a list of error records, preserving order.
pub fn standardise_errors(errors: &[ErrorRecord]) -> Vec<StandardizedError> {
    errors.iter().map(standardise_error).collect()
}

/// Standardize one error record.
///
/// Whatever the conformer's failure supplies wins; the rest defaults to the
/// record's field, the rule's path and the rule's parameters. A negated rule
/// gets the type `~<path>`. The message falls back to the type.
pub fn standardise_error(record: &ErrorRecord) -> StandardizedError {
    let (error_type, fields, message, params) = match &record.cause {
        FailureCause::Negated => (
            Some(format!("~{}", record.rule.fn_path())),
            None,
            None,
            None,
        ),
        FailureCause::Rule(failure) => (
            failure.error_type().map(str::to_string),
            failure.fields().map(<[String]>::to_vec),
            failure.message().map(str::to_string),
            failure.params().map(<[Value]>::to_vec),
        ),
    };

    let error_type = error_type.unwrap_or_else(|| record.rule.fn_path().to_string());
    let message = message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| error_type.clone());
    StandardizedError {
        fields: fields.unwrap_or_else(|| vec![record.field.clone()]),
        params: params.unwrap_or_else(|| record.rule.params.clone()),
        error_type,
        message,
    }
}
