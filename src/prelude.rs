//! Prelude module for convenient imports
//!
//! Import everything from this module for quick access to the full
//! quickdash surface:
//!
//! ```
//! use quickdash::prelude::*;
//!
//! let collection = Value::from_json(&serde_json::json!({ "a": 1, "b": 2 }));
//! assert_eq!(size(&collection), 2);
//! ```

// Core value types
pub use crate::value::{Key, NativeFn, Value};

// Error handling
pub use crate::error::{Error, Result};

// Collection operations
pub use crate::collection::{
    every, filter, find, find_index, for_each, group_by, group_by_into, keys, map, match_pattern,
    reduce, size, some, sort_by, to_extractor, to_matcher, union_by, unique_by, values, without,
    Extractor, Matcher,
};

// Sequence utilities
pub use crate::array::flatten;

// Object utilities and the nested accessor
pub use crate::object::{assign, get, get_or, merge, omit, pick, set};

// Type predicates
pub use crate::lang::{
    ensure_sequence, is_array, is_defined, is_function, is_nil, is_number, is_object, is_string,
    is_undefined,
};

// Timer facility
pub use crate::timers::{TimerStats, Timers};

// Function combinators
pub use crate::fns::{bind, debounce, throttle, Debounced, Throttled};

// Version constant
pub use crate::VERSION;
