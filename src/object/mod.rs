//! Object utilities and the nested-path accessor
//!
//! Shallow and deep mapping merges, key selection, and path-based
//! read/write into nested container structures with scaffolding of
//! intermediate containers.

use crate::collection::for_each;
use crate::error::{Error, Result};
use crate::value::{Key, Value};

/// The reserved prototype-linkage key `set` refuses to write through.
///
/// Untrusted path segments must not be able to reach the host object
/// model's delegation mechanism.
const PROTO_KEY: &str = "__proto__";

/// Copy own entries of each mapping source into the target mapping
///
/// Later sources win. Nil and non-mapping sources are skipped; the target
/// is returned (same handle).
pub fn assign(target: &Value, sources: &[Value]) -> Value {
    for source in sources {
        if !source.is_mapping() {
            continue;
        }

        for_each(source, |val, key| {
            target.set_entry(key, val.clone());
            Value::Undefined
        });
    }

    target.clone()
}

/// Recursively merge mapping sources into the target mapping
///
/// Where both sides of a key hold mappings, they merge in place; any other
/// value (sequences included) overwrites. Returns the target.
pub fn merge(target: &Value, sources: &[Value]) -> Value {
    if !target.is_mapping() {
        return target.clone();
    }

    for source in sources {
        if !source.is_mapping() {
            continue;
        }

        for_each(source, |val, key| {
            if val.is_mapping() {
                let nested = match target.get_entry(key) {
                    Some(existing) if existing.is_mapping() => existing,
                    _ => {
                        let created = Value::new_mapping();
                        target.set_entry(key, created.clone());
                        created
                    }
                };
                merge(&nested, std::slice::from_ref(val));
            } else {
                target.set_entry(key, val.clone());
            }

            Value::Undefined
        });
    }

    target.clone()
}

/// New mapping holding exactly the listed keys that exist on the target
pub fn pick(target: &Value, properties: &Value) -> Value {
    let result = Value::new_mapping();

    for_each(properties, |prop, _| {
        let key = Key::Name(prop.to_string());

        if let Some(val) = target.get_entry(&key) {
            result.set_entry(&key, val);
        }

        Value::Undefined
    });

    result
}

/// New mapping holding all own entries of the target except the listed keys
pub fn omit(target: &Value, properties: &Value) -> Value {
    let result = Value::new_mapping();

    for_each(target, |val, key| {
        let dropped = !crate::collection::find(
            properties,
            crate::collection::Matcher::equals(key.as_value()),
        )
        .is_undefined();

        if !dropped {
            result.set_entry(key, val.clone());
        }

        Value::Undefined
    });

    result
}

/// Read the value at a nested path, or `Undefined` if the path does not
/// reach one
pub fn get(target: &Value, path: &[Key]) -> Value {
    get_or(target, path, Value::Undefined)
}

/// Read the value at a nested path, falling back to a default
///
/// The walk stops with the default as soon as a segment is missing or the
/// current value cannot be descended into. A value that is present but nil
/// is returned as-is: `get({a: null}, [a])` is `Null`, while
/// `get({a: null}, [a, b])` falls back because `Null` has no entries.
pub fn get_or(target: &Value, path: &[Key], default_value: Value) -> Value {
    let mut current = target.clone();

    for segment in path {
        match current.get_entry(segment) {
            Some(next) => current = next,
            None => return default_value,
        }
    }

    current
}

/// Write a value at a nested path, mutating the target in place
///
/// Intermediate containers are scaffolded as needed: a numeric-looking next
/// segment scaffolds a sequence, anything else a mapping. An intermediate
/// entry holding a non-container value is overwritten with the scaffold.
/// Writing `Undefined` removes the entry at the final segment instead.
///
/// Fails with an illegal-key error, before any mutation, if any path
/// segment is the reserved prototype-linkage key.
pub fn set(target: &Value, path: &[Key], value: Value) -> Result<Value> {
    for segment in path {
        if let Key::Name(name) = segment {
            if name == PROTO_KEY {
                return Err(Error::illegal_key(name.clone()));
            }
        }
    }

    let mut current = target.clone();

    for (idx, segment) in path.iter().enumerate() {
        let last = idx + 1 == path.len();

        if last {
            if value.is_undefined() {
                current.remove_entry(segment);
            } else {
                current.set_entry(segment, value.clone());
            }
            break;
        }

        let next_segment = &path[idx + 1];

        current = match current.get_entry(segment) {
            Some(child) if child.is_container() => child,
            _ => {
                let scaffold = if next_segment.is_numeric() {
                    Value::new_sequence(Vec::new())
                } else {
                    Value::new_mapping()
                };
                current.set_entry(segment, scaffold.clone());
                scaffold
            }
        };
    }

    Ok(target.clone())
}
