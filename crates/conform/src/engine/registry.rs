//! Registry of conformers addressed by dotted path.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::engine::conformer::{from_async_fn, from_fn, predicate};
use crate::engine::{ConformContext, ConformError, Conformer, RuleFailure, compute_suggestions};

/// A tree of conformers. Paths like `"user.email"` walk namespaces.
///
/// Cloning is cheap: conformers are shared behind `Arc`. A registry is never
/// mutated by the engine, so one registry can serve many sessions.
///
/// # Example
///
/// ```
/// use conform::ConformerRegistry;
///
/// let mut strings = ConformerRegistry::new();
/// strings.register_predicate("non_empty", |v, _| v.as_str().is_some_and(|s| !s.is_empty()));
///
/// let mut registry = ConformerRegistry::new();
/// registry.insert_namespace("str", strings);
///
/// assert!(registry.contains("str.non_empty"));
/// assert!(registry.resolve("str").is_err());
/// ```
#[derive(Clone, Default)]
pub struct ConformerRegistry {
    entries: BTreeMap<String, Entry>,
}

#[derive(Clone)]
enum Entry {
    Conformer(Arc<dyn Conformer>),
    Namespace(ConformerRegistry),
}

impl ConformerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a conformer at `path`, creating namespaces along the way.
    ///
    /// An existing entry at `path` is replaced, as is a conformer standing
    /// where a namespace is needed.
    pub fn insert(&mut self, path: &str, conformer: Arc<dyn Conformer>) -> &mut Self {
        self.insert_entry(path, Entry::Conformer(conformer));
        self
    }

    /// Mount every conformer of `registry` under `path`.
    pub fn insert_namespace(&mut self, path: &str, registry: ConformerRegistry) -> &mut Self {
        self.insert_entry(path, Entry::Namespace(registry));
        self
    }

    /// Register a synchronous function.
    pub fn register_fn<F>(&mut self, path: &str, f: F) -> &mut Self
    where
        F: Fn(Value, &[Value], &mut ConformContext<'_>) -> Result<Value, RuleFailure>
            + Send
            + Sync
            + 'static,
    {
        self.insert(path, from_fn(f))
    }

    /// Register an async function.
    pub fn register_async_fn<F, Fut>(&mut self, path: &str, f: F) -> &mut Self
    where
        F: Fn(Value, Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, RuleFailure>> + Send + 'static,
    {
        self.insert(path, from_async_fn(f))
    }

    /// Register a boolean predicate; `false` fails the rule.
    pub fn register_predicate<F>(&mut self, path: &str, f: F) -> &mut Self
    where
        F: Fn(&Value, &[Value]) -> bool + Send + Sync + 'static,
    {
        self.insert(path, predicate(f))
    }

    /// Get the conformer at `path`, if there is one.
    pub fn get(&self, path: &str) -> Option<Arc<dyn Conformer>> {
        match self.entry(path)? {
            Entry::Conformer(conformer) => Some(Arc::clone(conformer)),
            Entry::Namespace(_) => None,
        }
    }

    /// Check if `path` names a conformer.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Resolve `path` to a conformer.
    ///
    /// # Errors
    ///
    /// Returns [`ConformError::UnknownConformer`] if nothing is registered at
    /// `path` or the path names a namespace.
    pub fn resolve(&self, path: &str) -> Result<Arc<dyn Conformer>, ConformError> {
        self.get(path)
            .ok_or_else(|| ConformError::UnknownConformer {
                path: path.to_string(),
                suggestions: compute_suggestions(path, &self.paths()),
            })
    }

    /// Full paths of every registered conformer, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_paths("", &mut paths);
        paths
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, path: &str) -> Option<&Entry> {
        match path.split_once('.') {
            None => self.entries.get(path),
            Some((head, tail)) => match self.entries.get(head)? {
                Entry::Namespace(namespace) => namespace.entry(tail),
                Entry::Conformer(_) => None,
            },
        }
    }

    fn insert_entry(&mut self, path: &str, entry: Entry) {
        match path.split_once('.') {
            None => {
                self.entries.insert(path.to_string(), entry);
            }
            Some((head, tail)) => {
                let slot = self
                    .entries
                    .entry(head.to_string())
                    .or_insert_with(|| Entry::Namespace(ConformerRegistry::new()));
                if matches!(*slot, Entry::Conformer(_)) {
                    *slot = Entry::Namespace(ConformerRegistry::new());
                }
                if let Entry::Namespace(namespace) = slot {
                    namespace.insert_entry(tail, entry);
                }
            }
        }
    }

    fn collect_paths(&self, prefix: &str, paths: &mut Vec<String>) {
        for (name, entry) in &self.entries {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            match entry {
                Entry::Conformer(_) => paths.push(path),
                Entry::Namespace(namespace) => namespace.collect_paths(&path, paths),
            }
        }
    }
}

impl fmt::Debug for ConformerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConformerRegistry")
            .field("paths", &self.paths())
            .finish()
    }
}
