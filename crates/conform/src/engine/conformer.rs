//! The conformer interface and adapters for plain functions.
//!
//! A conformer receives the current value, the rule's parameters and the
//! execution context. It returns the (possibly transformed) value on success
//! and a [`RuleFailure`] when the value does not conform.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::{ConformContext, RuleFailure};

/// A validation or transform step addressed by a rule.
///
/// Implementations may suspend; the pipeline awaits each call before running
/// the next rule.
#[async_trait]
pub trait Conformer: Send + Sync {
    /// Conform `value`, returning the value to pass to the next rule.
    ///
    /// Return the input unchanged when only validating.
    async fn conform(
        &self,
        value: Value,
        params: &[Value],
        ctx: &mut ConformContext<'_>,
    ) -> Result<Value, RuleFailure>;

    /// Name shown for inline conformers in logs and errors.
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// Adapter for a synchronous function.
pub struct FnConformer<F> {
    f: F,
}

#[async_trait]
impl<F> Conformer for FnConformer<F>
where
    F: Fn(Value, &[Value], &mut ConformContext<'_>) -> Result<Value, RuleFailure> + Send + Sync,
{
    async fn conform(
        &self,
        value: Value,
        params: &[Value],
        ctx: &mut ConformContext<'_>,
    ) -> Result<Value, RuleFailure> {
        (self.f)(value, params, ctx)
    }
}

/// Adapter for a function returning a future.
///
/// The future owns its inputs, so it has no access to the context.
pub struct AsyncFnConformer<F, Fut> {
    f: F,
    _future: PhantomData<fn() -> Fut>,
}

#[async_trait]
impl<F, Fut> Conformer for AsyncFnConformer<F, Fut>
where
    F: Fn(Value, Vec<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, RuleFailure>> + Send,
{
    async fn conform(
        &self,
        value: Value,
        params: &[Value],
        _ctx: &mut ConformContext<'_>,
    ) -> Result<Value, RuleFailure> {
        (self.f)(value, params.to_vec()).await
    }
}

/// Adapter for a boolean predicate.
///
/// `true` passes the value through unchanged; `false` is a failure.
pub struct PredicateConformer<F> {
    f: F,
}

#[async_trait]
impl<F> Conformer for PredicateConformer<F>
where
    F: Fn(&Value, &[Value]) -> bool + Send + Sync,
{
    async fn conform(
        &self,
        value: Value,
        params: &[Value],
        _ctx: &mut ConformContext<'_>,
    ) -> Result<Value, RuleFailure> {
        if (self.f)(&value, params) {
            Ok(value)
        } else {
            Err(RuleFailure::builder()
                .note("transformed false function")
                .build())
        }
    }
}

/// Wrap a synchronous function as a conformer.
pub fn from_fn<F>(f: F) -> Arc<dyn Conformer>
where
    F: Fn(Value, &[Value], &mut ConformContext<'_>) -> Result<Value, RuleFailure>
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnConformer { f })
}

/// Wrap an async function as a conformer.
pub fn from_async_fn<F, Fut>(f: F) -> Arc<dyn Conformer>
where
    F: Fn(Value, Vec<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, RuleFailure>> + Send + 'static,
{
    Arc::new(AsyncFnConformer {
        f,
        _future: PhantomData,
    })
}

/// Wrap a boolean predicate as a conformer.
pub fn predicate<F>(f: F) -> Arc<dyn Conformer>
where
    F: Fn(&Value, &[Value]) -> bool + Send + Sync + 'static,
{
    Arc::new(PredicateConformer { f })
}
