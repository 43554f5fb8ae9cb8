//! Collection traversal and query operations
//!
//! The single polymorphic iteration primitive ([`for_each`]) plus the query
//! operations layered on top of it. Every operation treats the two container
//! shapes uniformly and accepts nil input as an empty collection.

use crate::error::Result;
use crate::lang::ensure_sequence;
use crate::value::{Key, Value};
use rustc_hash::FxHashSet;

/// A matcher argument: a predicate over `(value, key)` or a value compared
/// by strict equality.
///
/// Normalized to a uniform predicate via [`to_matcher`] at the boundary of
/// every matcher-taking operation.
pub enum Matcher {
    /// Predicate over entry value and key
    Test(Box<dyn FnMut(&Value, &Key) -> bool>),
    /// Strict-equality comparison against the entry value
    Equals(Value),
}

impl Matcher {
    /// Matcher from a predicate function
    pub fn test(f: impl FnMut(&Value, &Key) -> bool + 'static) -> Self {
        Matcher::Test(Box::new(f))
    }

    /// Matcher comparing entries against a value by strict equality
    pub fn equals(value: impl Into<Value>) -> Self {
        Matcher::Equals(value.into())
    }
}

impl From<Value> for Matcher {
    fn from(value: Value) -> Self {
        Matcher::Equals(value)
    }
}

/// Normalize a matcher to a plain predicate function
pub fn to_matcher(matcher: Matcher) -> Box<dyn FnMut(&Value, &Key) -> bool> {
    match matcher {
        Matcher::Test(f) => f,
        Matcher::Equals(expected) => Box::new(move |val, _| val.strict_equals(&expected)),
    }
}

/// An extractor argument: a function from value to sort/group key, or a
/// field name looked up on each value.
pub enum Extractor {
    /// Mapping-key lookup; absent keys extract `Undefined`
    Field(String),
    /// Extraction function
    Fun(Box<dyn Fn(&Value) -> Value>),
}

impl Extractor {
    /// Extractor reading the named field
    pub fn field(name: impl Into<String>) -> Self {
        Extractor::Field(name.into())
    }

    /// Extractor from a function
    pub fn fun(f: impl Fn(&Value) -> Value + 'static) -> Self {
        Extractor::Fun(Box::new(f))
    }
}

impl From<&str> for Extractor {
    fn from(name: &str) -> Self {
        Extractor::Field(name.to_string())
    }
}

/// Normalize an extractor to a plain function
pub fn to_extractor(extractor: Extractor) -> Box<dyn Fn(&Value) -> Value> {
    match extractor {
        Extractor::Fun(f) => f,
        Extractor::Field(name) => {
            let key = Key::Name(name);
            Box::new(move |val| val.get_entry(&key).unwrap_or(Value::Undefined))
        }
    }
}

/// Iterate over a collection, presenting each entry as `(value, key)`.
///
/// Sequences enumerate in ascending index order with numeric keys; mappings
/// enumerate their own keys exactly once each, in unspecified order. Nil or
/// non-container input does nothing.
///
/// Returning the boolean literal `false` from the iterator stops the
/// iteration immediately, and `for_each` returns the *entry value* that
/// triggered the stop (this is what lets `find` short-circuit through the
/// same primitive). Any other result, including `Undefined`, continues.
///
/// Mutating the collection from within the iterator is not supported.
pub fn for_each<F>(collection: &Value, mut iterator: F) -> Value
where
    F: FnMut(&Value, &Key) -> Value,
{
    match collection {
        Value::Sequence(elements) => {
            let elements = elements.borrow();
            for (idx, val) in elements.iter().enumerate() {
                let key = Key::Index(idx);
                if matches!(iterator(val, &key), Value::Boolean(false)) {
                    return val.clone();
                }
            }
            Value::Undefined
        }
        Value::Mapping(entries) => {
            let entries = entries.borrow();
            for (name, val) in entries.iter() {
                let key = Key::Name(name.clone());
                if matches!(iterator(val, &key), Value::Boolean(false)) {
                    return val.clone();
                }
            }
            Value::Undefined
        }
        _ => Value::Undefined,
    }
}

/// Find the first entry value satisfying the matcher, or `Undefined`
pub fn find(collection: &Value, matcher: Matcher) -> Value {
    let mut matches = to_matcher(matcher);

    for_each(collection, |val, key| {
        if matches(val, key) {
            Value::Boolean(false)
        } else {
            Value::Undefined
        }
    })
}

/// Find the key of the first matching entry
///
/// Not-found defaults differ by shape: `-1` for sequences, `Undefined` for
/// mappings and nil input.
pub fn find_index(collection: &Value, matcher: Matcher) -> Value {
    let mut matches = to_matcher(matcher);

    let mut found = if collection.is_sequence() {
        Value::Number(-1.0)
    } else {
        Value::Undefined
    };

    for_each(collection, |val, key| {
        if matches(val, key) {
            found = key.as_value();
            Value::Boolean(false)
        } else {
            Value::Undefined
        }
    });

    found
}

/// Collect all matching entry values into a new sequence
pub fn filter(collection: &Value, matcher: Matcher) -> Value {
    let mut matches = to_matcher(matcher);
    let mut result = Vec::new();

    for_each(collection, |val, key| {
        if matches(val, key) {
            result.push(val.clone());
        }
        Value::Undefined
    });

    Value::new_sequence(result)
}

/// Return a sequence without the matching elements
///
/// Sequences only: a present non-sequence input is a type error. Nil input
/// yields `Undefined`.
pub fn without(arr: &Value, matcher: Matcher) -> Result<Value> {
    if arr.is_nullish() {
        return Ok(Value::Undefined);
    }

    ensure_sequence(arr)?;

    let mut matches = to_matcher(matcher);
    let mut result = Vec::new();

    for_each(arr, |val, key| {
        if !matches(val, key) {
            result.push(val.clone());
        }
        Value::Undefined
    });

    Ok(Value::new_sequence(result))
}

/// Left fold over the collection, seeded with an initial accumulator
///
/// Nil-safe: returns the seed unchanged.
pub fn reduce<F>(collection: &Value, mut iterator: F, seed: Value) -> Value
where
    F: FnMut(Value, &Value, &Key) -> Value,
{
    let mut acc = seed;

    for_each(collection, |val, key| {
        let current = std::mem::replace(&mut acc, Value::Undefined);
        acc = iterator(current, val, key);
        Value::Undefined
    });

    acc
}

/// Whether every entry satisfies the matcher; vacuously true on nil/empty
pub fn every(collection: &Value, matcher: Matcher) -> bool {
    let mut matches = to_matcher(matcher);

    reduce(
        collection,
        |acc, val, key| Value::Boolean(acc.to_boolean() && matches(val, key)),
        Value::Boolean(true),
    )
    .to_boolean()
}

/// Whether any entry satisfies the matcher; false on nil/empty
pub fn some(collection: &Value, matcher: Matcher) -> bool {
    find(collection, matcher).to_boolean()
}

/// Project each entry to a new value, producing a sequence
pub fn map<F>(collection: &Value, mut f: F) -> Value
where
    F: FnMut(&Value, &Key) -> Value,
{
    let mut result = Vec::new();

    for_each(collection, |val, key| {
        result.push(f(val, key));
        Value::Undefined
    });

    Value::new_sequence(result)
}

/// Sequence of entry keys (numbers for sequences, strings for mappings)
pub fn keys(collection: &Value) -> Value {
    map(collection, |_, key| key.as_value())
}

/// Number of own entries; 0 for nil input
pub fn size(collection: &Value) -> usize {
    match collection {
        Value::Sequence(elements) => elements.borrow().len(),
        Value::Mapping(entries) => entries.borrow().len(),
        _ => 0,
    }
}

/// Sequence of entry values
pub fn values(collection: &Value) -> Value {
    map(collection, |val, _| val.clone())
}

/// Group collection elements into a new mapping keyed by extraction result
///
/// A falsy extraction result collapses into the `"_"` bucket. Note that a
/// genuinely extracted `"_"` key lands in the same bucket.
pub fn group_by(collection: &Value, extractor: Extractor) -> Value {
    group_by_into(collection, extractor, Value::new_mapping())
}

/// Like [`group_by`], accumulating into a caller-supplied mapping so that
/// several collections can be grouped together
pub fn group_by_into(collection: &Value, extractor: Extractor, groups: Value) -> Value {
    let extract = to_extractor(extractor);

    for_each(collection, |val, _| {
        let bucket_key = Key::Name(bucket_name(&extract(val)));

        let bucket = match groups.get_entry(&bucket_key) {
            Some(existing) if existing.is_sequence() => existing,
            _ => {
                let created = Value::new_sequence(Vec::new());
                groups.set_entry(&bucket_key, created.clone());
                created
            }
        };

        if let Value::Sequence(elements) = &bucket {
            elements.borrow_mut().push(val.clone());
        }

        Value::Undefined
    });

    groups
}

fn bucket_name(discriminator: &Value) -> String {
    if discriminator.to_boolean() {
        discriminator.to_string()
    } else {
        "_".to_string()
    }
}

/// Keep only the first element seen per extracted key, across any number of
/// collections, preserving first-seen order
pub fn unique_by(extractor: Extractor, collections: &[Value]) -> Value {
    let extract = to_extractor(extractor);

    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut result = Vec::new();

    for collection in collections {
        for_each(collection, |val, _| {
            if seen.insert(bucket_name(&extract(val))) {
                result.push(val.clone());
            }
            Value::Undefined
        });
    }

    Value::new_sequence(result)
}

/// Alias of [`unique_by`]
pub fn union_by(extractor: Extractor, collections: &[Value]) -> Value {
    unique_by(extractor, collections)
}

/// Stable ascending sort by extracted key
///
/// Linear-scan insertion: each element is placed before the first existing
/// element with a strictly greater key, so equal keys retain input order.
pub fn sort_by(collection: &Value, extractor: Extractor) -> Value {
    let extract = to_extractor(extractor);

    let mut sorted: Vec<(Value, Value)> = Vec::new();

    for_each(collection, |val, _| {
        let discriminator = extract(val);

        let insert_at = sorted
            .iter()
            .position(|(existing, _)| discriminator.less_than(existing))
            .unwrap_or(sorted.len());

        sorted.insert(insert_at, (discriminator, val.clone()));
        Value::Undefined
    });

    Value::new_sequence(sorted.into_iter().map(|(_, val)| val).collect())
}

/// Create a matcher from a partial-shape pattern
///
/// The matcher is true for an element exactly when every own key of the
/// pattern maps to a strictly-equal value on the element. The empty pattern
/// matches everything.
pub fn match_pattern(pattern: &Value) -> Matcher {
    let pattern = pattern.clone();

    Matcher::test(move |el: &Value, _: &Key| {
        let el = el.clone();
        every(
            &pattern,
            Matcher::test(move |expected, key| {
                el.get_entry(key)
                    .unwrap_or(Value::Undefined)
                    .strict_equals(expected)
            }),
        )
    })
}
