//! In-memory storage implementation

use super::entry::Entry;
use super::error::StoreError;
use super::value::Value;
use siphasher::sip::SipHasher13;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::sync::RwLock;
use std::time::Duration;

/// Type alias for our hash map with SipHasher
type StoreMap = HashMap<String, Entry, BuildHasherDefault<SipHasher13>>;

/// In-memory typed key-value store
///
/// One reader/writer lock guards the whole map: getters and `keys` take
/// shared access, setters, `remove` and `sweep` take exclusive access.
/// Every operation is pure in-memory work, so the lock is never held
/// across I/O.
///
/// An entry whose deadline has passed is invisible to every read path
/// even before [`sweep`](Store::sweep) reclaims it.
///
/// The store is an explicitly owned instance; wrap it in an `Arc` to
/// share it between request handlers and the background sweeper.
pub struct Store {
    items: RwLock<StoreMap>,
}

/// Convert caller-facing TTL seconds into an optional duration.
///
/// Zero and negative TTLs mean "never expires", not "expire immediately".
fn ttl_from_seconds(ttl_seconds: i64) -> Option<Duration> {
    if ttl_seconds > 0 {
        Some(Duration::from_secs(ttl_seconds as u64))
    } else {
        None
    }
}

impl Store {
    /// Create a new store with default capacity
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a new store with specified initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Store {
            items: RwLock::new(HashMap::with_capacity_and_hasher(
                capacity,
                BuildHasherDefault::<SipHasher13>::default(),
            )),
        }
    }

    /// Insert a value, replacing any prior entry for the key
    ///
    /// `ttl_seconds > 0` makes the entry expire after that many seconds;
    /// `ttl_seconds <= 0` means it never expires.
    pub fn insert(&self, key: impl Into<String>, value: Value, ttl_seconds: i64) {
        self.insert_with_ttl(key, value, ttl_from_seconds(ttl_seconds));
    }

    /// Insert a value with an explicit optional TTL
    pub fn insert_with_ttl(&self, key: impl Into<String>, value: Value, ttl: Option<Duration>) {
        let entry = match ttl {
            Some(ttl) => Entry::with_ttl(value, ttl),
            None => Entry::new(value),
        };
        let mut items = self.items.write().unwrap();
        items.insert(key.into(), entry);
    }

    /// Set a string value
    pub fn set_string(&self, key: impl Into<String>, value: impl Into<String>, ttl_seconds: i64) {
        self.insert(key, Value::string(value), ttl_seconds);
    }

    /// Set an integer value
    pub fn set_integer(&self, key: impl Into<String>, value: i64, ttl_seconds: i64) {
        self.insert(key, Value::integer(value), ttl_seconds);
    }

    /// Set a string list value
    pub fn set_string_list(&self, key: impl Into<String>, value: Vec<String>, ttl_seconds: i64) {
        self.insert(key, Value::string_list(value), ttl_seconds);
    }

    /// Set an integer list value
    pub fn set_integer_list(&self, key: impl Into<String>, value: Vec<i64>, ttl_seconds: i64) {
        self.insert(key, Value::integer_list(value), ttl_seconds);
    }

    /// Set a string map value
    pub fn set_string_map(
        &self,
        key: impl Into<String>,
        value: HashMap<String, String>,
        ttl_seconds: i64,
    ) {
        self.insert(key, Value::string_map(value), ttl_seconds);
    }

    /// Set an integer map value
    pub fn set_integer_map(
        &self,
        key: impl Into<String>,
        value: HashMap<String, i64>,
        ttl_seconds: i64,
    ) {
        self.insert(key, Value::integer_map(value), ttl_seconds);
    }

    /// Get a copy of the whole entry, or `None` if unset or expired
    pub fn get_entry(&self, key: &str) -> Option<Entry> {
        let items = self.items.read().unwrap();
        match items.get(key) {
            Some(entry) if !entry.is_expired() => Some(entry.clone()),
            _ => None,
        }
    }

    /// Get a string value, or `None` if absent, expired or not a string
    pub fn get_string(&self, key: &str) -> Option<String> {
        let items = self.items.read().unwrap();
        match items.get(key) {
            Some(entry) if !entry.is_expired() => entry.value.as_string().map(str::to_owned),
            _ => None,
        }
    }

    /// Get an integer value, or `None` if absent, expired or not an integer
    pub fn get_integer(&self, key: &str) -> Option<i64> {
        let items = self.items.read().unwrap();
        match items.get(key) {
            Some(entry) if !entry.is_expired() => entry.value.as_integer(),
            _ => None,
        }
    }

    /// Get a string list value, or `None` on absence or variant mismatch
    pub fn get_string_list(&self, key: &str) -> Option<Vec<String>> {
        let items = self.items.read().unwrap();
        match items.get(key) {
            Some(entry) if !entry.is_expired() => {
                entry.value.as_string_list().map(|xs| xs.to_vec())
            }
            _ => None,
        }
    }

    /// Get an integer list value, or `None` on absence or variant mismatch
    pub fn get_integer_list(&self, key: &str) -> Option<Vec<i64>> {
        let items = self.items.read().unwrap();
        match items.get(key) {
            Some(entry) if !entry.is_expired() => {
                entry.value.as_integer_list().map(|xs| xs.to_vec())
            }
            _ => None,
        }
    }

    /// Get a string map value, or `None` on absence or variant mismatch
    pub fn get_string_map(&self, key: &str) -> Option<HashMap<String, String>> {
        let items = self.items.read().unwrap();
        match items.get(key) {
            Some(entry) if !entry.is_expired() => entry.value.as_string_map().cloned(),
            _ => None,
        }
    }

    /// Get an integer map value, or `None` on absence or variant mismatch
    pub fn get_integer_map(&self, key: &str) -> Option<HashMap<String, i64>> {
        let items = self.items.read().unwrap();
        match items.get(key) {
            Some(entry) if !entry.is_expired() => entry.value.as_integer_map().cloned(),
            _ => None,
        }
    }

    /// Get one element of a stored list by index
    ///
    /// Works for both list variants; the element comes back as a scalar
    /// `Value` so the caller keeps its type.
    pub fn list_element(&self, key: &str, index: usize) -> Result<Value, StoreError> {
        let items = self.items.read().unwrap();
        let entry = match items.get(key) {
            Some(entry) if !entry.is_expired() => entry,
            _ => return Err(StoreError::NotFound(key.to_owned())),
        };

        match &entry.value {
            Value::StringList(xs) => xs
                .get(index)
                .map(|s| Value::string(s.clone()))
                .ok_or(StoreError::IndexOutOfRange {
                    index,
                    len: xs.len(),
                }),
            Value::IntegerList(xs) => {
                xs.get(index)
                    .map(|i| Value::integer(*i))
                    .ok_or(StoreError::IndexOutOfRange {
                        index,
                        len: xs.len(),
                    })
            }
            other => Err(StoreError::WrongType {
                key: key.to_owned(),
                actual: other.type_name(),
            }),
        }
    }

    /// Get one value of a stored map by sub-key
    ///
    /// Works for both map variants. A missing sub-key is a normal empty
    /// result (`Ok(None)`), not an error.
    pub fn map_value(&self, key: &str, sub_key: &str) -> Result<Option<Value>, StoreError> {
        let items = self.items.read().unwrap();
        let entry = match items.get(key) {
            Some(entry) if !entry.is_expired() => entry,
            _ => return Err(StoreError::NotFound(key.to_owned())),
        };

        match &entry.value {
            Value::StringMap(m) => Ok(m.get(sub_key).map(|s| Value::string(s.clone()))),
            Value::IntegerMap(m) => Ok(m.get(sub_key).map(|i| Value::integer(*i))),
            other => Err(StoreError::WrongType {
                key: key.to_owned(),
                actual: other.type_name(),
            }),
        }
    }

    /// Remove a key immediately
    ///
    /// An expired-but-unswept entry counts as already gone and yields
    /// `NotFound`; its corpse is dropped while we hold the write lock.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut items = self.items.write().unwrap();
        match items.remove(key) {
            Some(entry) if !entry.is_expired() => Ok(()),
            _ => Err(StoreError::NotFound(key.to_owned())),
        }
    }

    /// Get all keys whose entry is present and not expired
    ///
    /// The order is unspecified.
    pub fn keys(&self) -> Vec<String> {
        let items = self.items.read().unwrap();
        items
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Get the number of live (non-expired) keys
    pub fn len(&self) -> usize {
        let items = self.items.read().unwrap();
        items.values().filter(|entry| !entry.is_expired()).count()
    }

    /// Check if the store holds no live keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all keys
    pub fn clear(&self) {
        self.items.write().unwrap().clear();
    }

    /// Delete every entry whose expiration deadline has passed
    ///
    /// The whole map is scanned under one write acquisition, so an entry
    /// created during the sweep is never deleted by the same cycle.
    /// Idempotent and safe to call at any frequency.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self) -> usize {
        let mut items = self.items.write().unwrap();
        let before = items.len();
        items.retain(|_, entry| !entry.is_expired());
        before - items.len()
    }

    /// Get statistics about the store
    pub fn stats(&self) -> StoreStats {
        let items = self.items.read().unwrap();
        let live_keys = items.values().filter(|entry| !entry.is_expired()).count();
        let used_memory_bytes = items
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .map(|(key, entry)| key.len() + entry.memory_usage())
            .sum();

        StoreStats {
            total_keys: items.len(),
            live_keys,
            expired_keys: items.len() - live_keys,
            used_memory_bytes,
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the store
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub total_keys: usize,
    pub live_keys: usize,
    pub expired_keys: usize,
    pub used_memory_bytes: usize,
}
