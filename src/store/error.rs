//! Error types for store operations

use thiserror::Error;

/// Errors returned by store operations
///
/// All conditions are local and non-retryable; callers decide whether and
/// how to surface them. A missing sub-key on a map lookup is not an error
/// (see [`Store::map_value`](super::Store::map_value)).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The key is not set, or its entry has expired
    #[error("key not found: {0}")]
    NotFound(String),

    /// The stored variant does not match the requested accessor
    #[error("wrong type: key {key} holds a {actual}")]
    WrongType {
        key: String,
        actual: &'static str,
    },

    /// A list accessor index was outside `[0, len)`
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A set request could not be classified into a supported value type
    #[error("unsupported value type")]
    UnsupportedType,
}
