//! Value types for the key-value store

use std::collections::HashMap;

/// Represents the different types of values that can be stored
///
/// The set of variants is closed: every stored value is exactly one of
/// these six shapes. An integer zero, an empty string, an empty list and
/// an empty map are all ordinary values, distinct from "no value stored".
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// String value
    String(String),

    /// 64-bit signed integer value
    Integer(i64),

    /// Ordered list of strings
    StringList(Vec<String>),

    /// Ordered list of integers
    IntegerList(Vec<i64>),

    /// String-keyed map of strings
    StringMap(HashMap<String, String>),

    /// String-keyed map of integers
    IntegerMap(HashMap<String, i64>),
}

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Create an integer value
    pub fn integer(i: i64) -> Self {
        Value::Integer(i)
    }

    /// Create a string list value
    pub fn string_list(xs: impl Into<Vec<String>>) -> Self {
        Value::StringList(xs.into())
    }

    /// Create an integer list value
    pub fn integer_list(xs: impl Into<Vec<i64>>) -> Self {
        Value::IntegerList(xs.into())
    }

    /// Create a string map value
    pub fn string_map(m: HashMap<String, String>) -> Self {
        Value::StringMap(m)
    }

    /// Create an integer map value
    pub fn integer_map(m: HashMap<String, i64>) -> Self {
        Value::IntegerMap(m)
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::StringList(_) => "string_list",
            Value::IntegerList(_) => "integer_list",
            Value::StringMap(_) => "string_map",
            Value::IntegerMap(_) => "integer_map",
        }
    }

    /// Check if value is a list variant
    pub fn is_list(&self) -> bool {
        matches!(self, Value::StringList(_) | Value::IntegerList(_))
    }

    /// Check if value is a map variant
    pub fn is_map(&self) -> bool {
        matches!(self, Value::StringMap(_) | Value::IntegerMap(_))
    }

    /// Try to get as string reference
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as string list reference
    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            Value::StringList(xs) => Some(xs),
            _ => None,
        }
    }

    /// Try to get as integer list reference
    pub fn as_integer_list(&self) -> Option<&[i64]> {
        match self {
            Value::IntegerList(xs) => Some(xs),
            _ => None,
        }
    }

    /// Try to get as string map reference
    pub fn as_string_map(&self) -> Option<&HashMap<String, String>> {
        match self {
            Value::StringMap(m) => Some(m),
            _ => None,
        }
    }

    /// Try to get as integer map reference
    pub fn as_integer_map(&self) -> Option<&HashMap<String, i64>> {
        match self {
            Value::IntegerMap(m) => Some(m),
            _ => None,
        }
    }

    /// Calculate approximate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        match self {
            Value::String(s) => s.len(),
            Value::Integer(_) => std::mem::size_of::<i64>(),
            Value::StringList(xs) => {
                let items_size: usize = xs.iter().map(|s| s.len()).sum();
                items_size + std::mem::size_of::<Vec<String>>()
            }
            Value::IntegerList(xs) => {
                xs.len() * std::mem::size_of::<i64>() + std::mem::size_of::<Vec<i64>>()
            }
            Value::StringMap(m) => {
                let items_size: usize = m.iter().map(|(k, v)| k.len() + v.len()).sum();
                items_size + std::mem::size_of::<HashMap<String, String>>()
            }
            Value::IntegerMap(m) => {
                let items_size: usize = m
                    .keys()
                    .map(|k| k.len() + std::mem::size_of::<i64>())
                    .sum();
                items_size + std::mem::size_of::<HashMap<String, i64>>()
            }
        }
    }
}
