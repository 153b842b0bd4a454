use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::engine::Conformer;
use crate::types::FlagSet;

/// The function a rule invokes.
#[derive(Clone)]
pub enum FnRef {
    /// A dotted path resolved against the session's registry at call time.
    Path(String),
    /// A conformer supplied directly in the rule, bypassing the registry.
    Inline(Arc<dyn Conformer>),
}

impl FnRef {
    /// The registry path, or the inline conformer's name.
    pub fn name(&self) -> &str {
        match self {
            FnRef::Path(path) => path,
            FnRef::Inline(conformer) => conformer.name(),
        }
    }
}

impl fmt::Debug for FnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FnRef::Path(path) => f.debug_tuple("Path").field(path).finish(),
            FnRef::Inline(conformer) => f.debug_tuple("Inline").field(&conformer.name()).finish(),
        }
    }
}

impl PartialEq for FnRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FnRef::Path(a), FnRef::Path(b)) => a == b,
            (FnRef::Inline(a), FnRef::Inline(b)) => {
                Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
            }
            (FnRef::Path(_), FnRef::Inline(_)) | (FnRef::Inline(_), FnRef::Path(_)) => false,
        }
    }
}

impl From<&str> for FnRef {
    fn from(path: &str) -> Self {
        FnRef::Path(path.to_string())
    }
}

impl From<String> for FnRef {
    fn from(path: String) -> Self {
        FnRef::Path(path)
    }
}

impl From<Arc<dyn Conformer>> for FnRef {
    fn from(conformer: Arc<dyn Conformer>) -> Self {
        FnRef::Inline(conformer)
    }
}

/// A rule after compilation: flags, target function and parameters.
///
/// Compiled rules are immutable and compare equal when compiled from the
/// same source.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRule {
    pub flags: FlagSet,
    pub target: FnRef,
    pub params: Vec<Value>,
}

impl CompiledRule {
    /// Create a rule targeting a registry path.
    pub fn path(
        flags: FlagSet,
        fn_path: impl Into<String>,
        params: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self {
            flags,
            target: FnRef::Path(fn_path.into()),
            params: params.into_iter().collect(),
        }
    }

    /// The function path used in logs and standardized errors.
    pub fn fn_path(&self) -> &str {
        self.target.name()
    }
}

/// Renders the rule back into rule text, e.g. `?!a.above:10,20`.
impl fmt::Display for CompiledRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.flags, self.fn_path())?;
        for (index, param) in self.params.iter().enumerate() {
            f.write_str(if index == 0 { ":" } else { "," })?;
            match param {
                Value::String(s) => f.write_str(s)?,
                other => write!(f, "{other}")?,
            }
        }
        Ok(())
    }
}
