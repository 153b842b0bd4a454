//! Rule compiler.
//!
//! Normalizes every accepted rule shape into [`CompiledRule`]s:
//! - pipe-delimited text: `"a | ?b:1,2 | ~c"`
//! - single rule text: `"?!a.above:10"`
//! - positional: `("?a.above", [10, 20])`, parameters kept verbatim
//! - inline: `(("?", conformer), [params])`, bypassing the registry
//!
//! Compilation is pure. Paths are not resolved here; that happens when the
//! rule runs.

use std::iter;

use serde_json::Value;

use crate::engine::ConformError;
use crate::parser::{parse_flags, parse_params, parse_rule_text};
use crate::types::{CompiledRule, FieldRuleMap, FnRef, RuleSource, Rules};

/// Compile a field's rules, in order.
///
/// Pipe-delimited text is split on `|`. Whitespace next to a separator and
/// empty segments are dropped; the last rule keeps any trailing whitespace in
/// its parameters.
///
/// # Errors
///
/// Returns [`ConformError::MalformedRule`] for rule text without a function
/// path.
pub fn compile_rules(rules: &Rules) -> Result<Vec<CompiledRule>, ConformError> {
    match rules {
        Rules::Text(text) => split_rules(text).map(compile_text).collect(),
        Rules::List(sources) => sources.iter().map(compile_rule).collect(),
    }
}

/// Compile a single rule.
///
/// # Errors
///
/// Returns [`ConformError::MalformedRule`] for rule text without a function
/// path.
pub fn compile_rule(source: &RuleSource) -> Result<CompiledRule, ConformError> {
    match source {
        RuleSource::Text(text) => compile_text(text),
        RuleSource::Positional { head, params } => {
            let parsed = parse_rule_text(head).map_err(|source| ConformError::MalformedRule {
                text: head.clone(),
                source,
            })?;
            Ok(CompiledRule::path(
                parse_flags(parsed.flag_string),
                parsed.fn_path.trim_end(),
                params.iter().cloned(),
            ))
        }
        RuleSource::Inline {
            flags,
            target,
            params,
        } => Ok(CompiledRule {
            flags: parse_flags(flags),
            target: target.clone(),
            params: params.clone(),
        }),
    }
}

fn split_rules(text: &str) -> impl Iterator<Item = &str> {
    let (head, last) = text.rsplit_once('|').unwrap_or(("", text));
    head.split('|')
        .map(str::trim)
        .chain(iter::once(last.trim_start()))
        .filter(|rule| !rule.is_empty())
}

fn compile_text(text: &str) -> Result<CompiledRule, ConformError> {
    let parsed = parse_rule_text(text).map_err(|source| ConformError::MalformedRule {
        text: text.to_string(),
        source,
    })?;
    Ok(CompiledRule::path(
        parse_flags(parsed.flag_string),
        parsed.fn_path.trim_end(),
        parse_params(parsed.params_string)
            .into_iter()
            .map(Value::String),
    ))
}

// =============================================================================
// JSON rule maps
// =============================================================================

/// Read a field rule map from JSON.
///
/// The value must be an object mapping each field to a rule string or an
/// array of rule forms (see [`rules_from_json`]). Field order is kept.
///
/// # Errors
///
/// Returns [`ConformError::NonConformingRule`] for anything else.
pub fn field_rules_from_json(value: &Value) -> Result<FieldRuleMap, ConformError> {
    let Value::Object(map) = value else {
        return Err(non_conforming(value));
    };
    map.iter()
        .map(|(field, rules)| rules_from_json(rules).map(|rules| (field.clone(), rules)))
        .collect()
}

/// Read one field's rules from JSON.
///
/// Accepts a pipe-delimited string, or an array whose items are each one of:
/// - `"flags+path:params"`
/// - `["flags+path", param, ...]`
/// - `[["flags", "path"], param, ...]`
///
/// # Errors
///
/// Returns [`ConformError::NonConformingRule`] for any other shape.
pub fn rules_from_json(value: &Value) -> Result<Rules, ConformError> {
    match value {
        Value::String(text) => Ok(Rules::Text(text.clone())),
        Value::Array(items) => items
            .iter()
            .map(rule_source_from_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Rules::List),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Object(_) => {
            Err(non_conforming(value))
        }
    }
}

fn rule_source_from_json(value: &Value) -> Result<RuleSource, ConformError> {
    let items = match value {
        Value::String(text) => return Ok(RuleSource::Text(text.clone())),
        Value::Array(items) => items,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Object(_) => {
            return Err(non_conforming(value));
        }
    };
    match items.split_first() {
        Some((Value::String(head), params)) => Ok(RuleSource::Positional {
            head: head.clone(),
            params: params.to_vec(),
        }),
        Some((Value::Array(pair), params)) => match pair.as_slice() {
            [Value::String(flags), Value::String(path)] => Ok(RuleSource::Inline {
                flags: flags.clone(),
                target: FnRef::Path(path.clone()),
                params: params.to_vec(),
            }),
            [Value::Null, Value::String(path)] => Ok(RuleSource::Inline {
                flags: String::new(),
                target: FnRef::Path(path.clone()),
                params: params.to_vec(),
            }),
            _ => Err(non_conforming(value)),
        },
        _ => Err(non_conforming(value)),
    }
}

fn non_conforming(rule: &Value) -> ConformError {
    ConformError::NonConformingRule {
        rule: rule.to_string(),
    }
}
