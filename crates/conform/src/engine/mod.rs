//! Conformance engine.
//!
//! This module resolves compiled rules against a registry of conformers,
//! runs each field's pipeline and collects errors. [`ConformSession`] is the
//! entry point.

mod conformer;
mod context;
mod error;
mod pipeline;
mod registry;
mod session;
mod standardize;

pub use conformer::{
    AsyncFnConformer, Conformer, FnConformer, PredicateConformer, from_async_fn, from_fn, predicate,
};
pub use context::ConformContext;
pub use error::{ConformError, ErrorRecord, FailureCause, RuleFailure, compute_suggestions};
pub use pipeline::FieldOutcome;
pub use registry::ConformerRegistry;
pub use session::ConformSession;
pub use standardize::{StandardizedError, standardise_error, standardise_errors};
