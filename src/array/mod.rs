//! Sequence utilities

use crate::collection::for_each;
use crate::value::Value;

/// Flatten a sequence one level deep
///
/// Nested sequences are spliced in place; any other element is kept as-is.
/// Nil-safe: returns an empty sequence.
pub fn flatten(arr: &Value) -> Value {
    let mut result = Vec::new();

    for_each(arr, |el, _| {
        match el {
            Value::Sequence(nested) => result.extend(nested.borrow().iter().cloned()),
            other => result.push(other.clone()),
        }
        Value::Undefined
    });

    Value::new_sequence(result)
}
