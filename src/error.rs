//! Error types for quickdash

use thiserror::Error;

/// Main error type for quickdash
///
/// The fatal surface is deliberately tiny: bad input to the two
/// strict-input operations. Nil collections passed to query operations
/// are never an error; they degrade to empty results instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Wrong shape for operation (e.g. a mapping passed to `without`)
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Reserved key used as a path segment in `set`
    #[error("illegal key: {0}")]
    IllegalKey(String),
}

impl Error {
    /// Create a TypeError
    pub fn type_error(message: impl Into<String>) -> Self {
        Error::TypeError(message.into())
    }

    /// Create an illegal-key error
    pub fn illegal_key(key: impl Into<String>) -> Self {
        Error::IllegalKey(key.into())
    }
}

/// Result type alias for quickdash
pub type Result<T> = std::result::Result<T, Error>;
