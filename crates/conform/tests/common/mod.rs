//! Conformers shared by the integration tests.

use std::time::Duration;

use conform::{ConformContext, ConformSession, ConformerRegistry, RuleFailure};
use serde_json::{Value, json};
use tokio::time::sleep;

const DELAY: Duration = Duration::from_millis(200);

pub fn pass(
    value: Value,
    _params: &[Value],
    _ctx: &mut ConformContext<'_>,
) -> Result<Value, RuleFailure> {
    Ok(value)
}

pub fn mutate(
    value: Value,
    _params: &[Value],
    _ctx: &mut ConformContext<'_>,
) -> Result<Value, RuleFailure> {
    Ok(append_bob(value))
}

pub fn reject(
    _value: Value,
    _params: &[Value],
    _ctx: &mut ConformContext<'_>,
) -> Result<Value, RuleFailure> {
    Err(RuleFailure::new("fail"))
}

pub async fn delay_pass(value: Value, _params: Vec<Value>) -> Result<Value, RuleFailure> {
    sleep(DELAY).await;
    Ok(value)
}

pub async fn delay_mutate(value: Value, _params: Vec<Value>) -> Result<Value, RuleFailure> {
    sleep(DELAY).await;
    Ok(append_bob(value))
}

pub async fn delay_reject(_value: Value, _params: Vec<Value>) -> Result<Value, RuleFailure> {
    sleep(DELAY).await;
    Err(RuleFailure::new("fail"))
}

fn append_bob(value: Value) -> Value {
    json!(format!("{}bob", value.as_str().unwrap_or_default()))
}

/// The `test_fn.*` conformers: pass, mutate and reject, each also in a
/// suspending `delay_` form.
pub fn test_registry() -> ConformerRegistry {
    let mut test_fn = ConformerRegistry::new();
    test_fn
        .register_fn("pass", pass)
        .register_fn("mutate", mutate)
        .register_fn("reject", reject)
        .register_async_fn("delay_pass", delay_pass)
        .register_async_fn("delay_mutate", delay_mutate)
        .register_async_fn("delay_reject", delay_reject);

    let mut registry = ConformerRegistry::new();
    registry.insert_namespace("test_fn", test_fn);
    registry
}

pub fn new_session(input: Value) -> ConformSession {
    ConformSession::builder()
        .input(input)
        .conformers(test_registry())
        .build()
}
