//! Shared test helpers for integration tests

use quickdash::{NativeFn, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// Build a value from JSON literal notation
pub fn val(json: serde_json::Value) -> Value {
    Value::from_json(&json)
}

/// A recording callable plus its call log of `(context, args)` pairs
#[allow(dead_code)]
pub fn recorder() -> (NativeFn, Rc<RefCell<Vec<(Value, Vec<Value>)>>>) {
    let calls: Rc<RefCell<Vec<(Value, Vec<Value>)>>> = Rc::new(RefCell::new(Vec::new()));

    let log = calls.clone();
    let f: NativeFn = Rc::new(move |context, args| {
        log.borrow_mut().push((context.clone(), args.to_vec()));
        Ok(Value::Undefined)
    });

    (f, calls)
}

/// Initialize tracing output for debugging test runs (idempotent)
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
