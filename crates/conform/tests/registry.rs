//! Tests for conformer registration and path resolution.

mod common;

use std::sync::Arc;

use conform::engine::{compute_suggestions, from_fn};
use conform::{ConformError, ConformSession, ConformerRegistry, Rules};
use serde_json::json;

use common::{new_session, test_registry};

#[test]
fn test_nested_paths_resolve() {
    let registry = test_registry();
    assert!(registry.contains("test_fn.pass"));
    assert!(registry.contains("test_fn.delay_reject"));
    assert!(registry.resolve("test_fn.mutate").is_ok());
}

#[test]
fn test_insert_creates_namespaces() {
    let mut registry = ConformerRegistry::new();
    registry.insert("a.b.c", from_fn(|v, _, _| Ok(v)));
    assert!(registry.contains("a.b.c"));
    assert!(!registry.contains("a.b"));
    assert_eq!(registry.paths(), vec!["a.b.c"]);
}

#[test]
fn test_paths_are_sorted() {
    let mut registry = ConformerRegistry::new();
    registry
        .insert("z", from_fn(|v, _, _| Ok(v)))
        .insert("a.y", from_fn(|v, _, _| Ok(v)))
        .insert("a.x", from_fn(|v, _, _| Ok(v)));
    assert_eq!(registry.paths(), vec!["a.x", "a.y", "z"]);
}

#[test]
fn test_conformer_replaced_by_namespace() {
    let mut registry = ConformerRegistry::new();
    registry.insert("a", from_fn(|v, _, _| Ok(v)));
    registry.insert("a.b", from_fn(|v, _, _| Ok(v)));
    assert!(!registry.contains("a"));
    assert!(registry.contains("a.b"));
}

#[test]
fn test_unknown_path() {
    let registry = test_registry();
    let err = registry.resolve("test_fn.missing").err().unwrap();
    assert!(matches!(
        err,
        ConformError::UnknownConformer { ref path, .. } if path == "test_fn.missing"
    ));
}

#[test]
fn test_namespace_is_not_callable() {
    let registry = test_registry();
    assert!(registry.get("test_fn").is_none());
    assert!(matches!(
        registry.resolve("test_fn").err().unwrap(),
        ConformError::UnknownConformer { .. }
    ));
}

#[test]
fn test_path_through_conformer_is_unknown() {
    let registry = test_registry();
    assert!(registry.get("test_fn.pass.deeper").is_none());
}

#[test]
fn test_unknown_path_suggests_close_names() {
    let registry = test_registry();
    let err = registry.resolve("test_fn.mutat").err().unwrap();
    match err {
        ConformError::UnknownConformer { suggestions, .. } => {
            assert_eq!(suggestions, vec!["test_fn.mutate"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_compute_suggestions_limits_to_three() {
    let available: Vec<String> = (0..10).map(|i| format!("item{i}")).collect();
    let suggestions = compute_suggestions("item", &available);
    assert_eq!(suggestions.len(), 3);
}

#[test]
fn test_compute_suggestions_short_names() {
    let available = vec!["abc".to_string(), "xyz".to_string()];
    assert_eq!(compute_suggestions("abd", &available), vec!["abc"]);
    assert!(compute_suggestions("aaa", &available).is_empty());
}

#[test]
fn test_debug_lists_paths() {
    let debug = format!("{:?}", test_registry());
    assert!(debug.contains("test_fn.pass"));
}

// =============================================================================
// Late binding
// =============================================================================

#[tokio::test]
async fn test_registry_change_between_calls_is_observed() {
    let mut session = new_session(json!({"name": "moe"}));
    let rules = Rules::from("custom.upper");

    let err = session.field_rules("name", &rules).await.unwrap_err();
    assert!(matches!(err, ConformError::UnknownConformer { .. }));

    session.add_conformer(
        "custom.upper",
        from_fn(|v, _, _| Ok(json!(v.as_str().unwrap_or_default().to_uppercase()))),
    );
    let outcome = session.field_rules("name", &rules).await.unwrap();
    assert_eq!(outcome.into_value(), json!("MOE"));
}

#[test]
fn test_add_conformer_does_not_leak_into_shared_registry() {
    let shared = Arc::new(test_registry());
    let mut session = ConformSession::builder()
        .conformers(Arc::clone(&shared))
        .build();
    session.add_conformer("extra", from_fn(|v, _, _| Ok(v)));

    assert!(session.conformers().contains("extra"));
    assert!(!shared.contains("extra"));
}
