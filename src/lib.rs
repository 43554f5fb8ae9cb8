//! Quickdash: collection, object, and function utilities for dynamic values
//!
//! Quickdash provides generic helpers over the two dynamic container shapes
//! (ordered sequences and key-value mappings) together with a nested-path
//! accessor and timer-based function combinators. It is consumed as a library
//! dependency, not an end-user program.
//!
//! # Features
//!
//! - **Uniform traversal**: one iteration primitive treats sequences and
//!   mappings polymorphically; every query operation is built on it
//! - **Nil safety**: absent collections behave as empty collections instead
//!   of failing
//! - **Path accessor**: nested `get`/`set` with container scaffolding and a
//!   reserved-key guard
//! - **Combinators**: `debounce`, `throttle`, and `bind` over a cooperative
//!   virtual-time timer queue
//!
//! # Quick Start
//!
//! ```
//! use quickdash::{filter, Matcher, Value};
//!
//! let numbers = Value::from_json(&serde_json::json!([50, 200, 500]));
//! let large = filter(&numbers, Matcher::test(|el, _| el.to_number() > 100.0));
//!
//! assert!(large.deep_equals(&Value::from_json(&serde_json::json!([200, 500]))));
//! ```
//!
//! # Module Overview
//!
//! | Category | Modules |
//! |----------|---------|
//! | **Core** | [`value`], [`collection`], [`error`](Error) |
//! | **Accessors** | [`object`], [`array`] |
//! | **Predicates** | [`lang`] |
//! | **Timing** | [`timers`], [`fns`] |

pub mod array;
pub mod collection;
pub mod fns;
pub mod lang;
pub mod object;
pub mod prelude;
pub mod timers;
pub mod value;

mod error;

pub use error::{Error, Result};

pub use value::{Key, NativeFn, Value};

pub use collection::{
    every, filter, find, find_index, for_each, group_by, group_by_into, keys, map, match_pattern,
    reduce, size, some, sort_by, to_extractor, to_matcher, union_by, unique_by, values, without,
    Extractor, Matcher,
};

pub use array::flatten;

pub use object::{assign, get, get_or, merge, omit, pick, set};

pub use lang::{
    ensure_sequence, is_array, is_defined, is_function, is_nil, is_number, is_object, is_string,
    is_undefined,
};

pub use timers::{TimerStats, Timers};

pub use fns::{bind, debounce, throttle, Debounced, Throttled};

/// Quickdash version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
