//! Runtime type predicates
//!
//! Pure classification helpers over [`Value`]. These are the shape checks
//! the collection operations dispatch on.

use crate::error::{Error, Result};
use crate::value::Value;

/// Check whether a value is undefined
pub fn is_undefined(value: &Value) -> bool {
    value.is_undefined()
}

/// Check whether a value is anything but undefined
pub fn is_defined(value: &Value) -> bool {
    !value.is_undefined()
}

/// Check whether a value is nil (undefined or null)
pub fn is_nil(value: &Value) -> bool {
    value.is_nullish()
}

/// Check whether a value is a sequence
pub fn is_array(value: &Value) -> bool {
    value.is_sequence()
}

/// Check whether a value is one of the container shapes
pub fn is_object(value: &Value) -> bool {
    value.is_container()
}

/// Check whether a value is a number
pub fn is_number(value: &Value) -> bool {
    matches!(value, Value::Number(_))
}

/// Check whether a value is a string
pub fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// Check whether a value is callable
pub fn is_function(value: &Value) -> bool {
    value.is_function()
}

/// Ensure a value is a sequence
///
/// Used by the strict-input operations that refuse mappings.
pub fn ensure_sequence(value: &Value) -> Result<()> {
    if value.is_sequence() {
        Ok(())
    } else {
        Err(Error::type_error(format!(
            "{} not supported, sequence expected",
            value.type_name()
        )))
    }
}
