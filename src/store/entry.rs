//! Entry structure for key-value pairs

use super::value::Value;
use std::time::{Duration, Instant};

/// Represents a single entry in the store
///
/// An entry is created whole by a set operation and replaced whole by the
/// next one; there is no update-in-place.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The value
    pub value: Value,

    /// Optional expiration time (absolute). `None` means the entry
    /// never expires.
    pub expires_at: Option<Instant>,
}

impl Entry {
    /// Create a new entry without expiration
    pub fn new(value: Value) -> Self {
        Entry {
            value,
            expires_at: None,
        }
    }

    /// Create a new entry that expires after `ttl`
    pub fn with_ttl(value: Value, ttl: Duration) -> Self {
        Entry {
            value,
            expires_at: Some(Instant::now() + ttl),
        }
    }

    /// Check if the entry has expired
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Instant::now() >= expires_at,
            None => false,
        }
    }

    /// Calculate approximate memory usage of this entry in bytes
    pub fn memory_usage(&self) -> usize {
        self.value.memory_usage() + std::mem::size_of::<Option<Instant>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_without_ttl_never_expires() {
        let entry = Entry::new(Value::string("v"));
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_with_ttl_expires() {
        let entry = Entry::with_ttl(Value::string("v"), Duration::from_millis(20));
        assert!(!entry.is_expired());

        std::thread::sleep(Duration::from_millis(40));
        assert!(entry.is_expired());
    }
}
