//! HTTP handlers for the storage API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use sysinfo::System;
use tracing::debug;

use crate::store::{Store, StoreError, Value};

/// Shared application state
pub type AppState = Arc<Store>;

/// Request body for setting a value
///
/// Exactly one of the value fields should be present; the first populated
/// field (in declaration order) decides the stored variant. A body with
/// none of them populated is rejected as an unsupported type. The caller
/// picks the variant here, at the boundary; the store never guesses from
/// a weakly-typed value.
#[derive(Debug, Default, Deserialize)]
pub struct SetRequest {
    pub string: Option<String>,
    pub integer: Option<i64>,
    pub string_list: Option<Vec<String>>,
    pub integer_list: Option<Vec<i64>>,
    pub string_map: Option<HashMap<String, String>>,
    pub integer_map: Option<HashMap<String, i64>>,

    /// TTL in seconds; `<= 0` (the default) means the entry never expires
    #[serde(default)]
    pub ttl: i64,
}

/// A stored value in its JSON representation, tagged by variant
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueBody {
    String(String),
    Integer(i64),
    StringList(Vec<String>),
    IntegerList(Vec<i64>),
    StringMap(HashMap<String, String>),
    IntegerMap(HashMap<String, i64>),
}

impl From<Value> for ValueBody {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => ValueBody::String(s),
            Value::Integer(i) => ValueBody::Integer(i),
            Value::StringList(xs) => ValueBody::StringList(xs),
            Value::IntegerList(xs) => ValueBody::IntegerList(xs),
            Value::StringMap(m) => ValueBody::StringMap(m),
            Value::IntegerMap(m) => ValueBody::IntegerMap(m),
        }
    }
}

/// Uniform response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueBody>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
}

impl ApiResponse {
    fn ok() -> Self {
        ApiResponse {
            success: true,
            message: None,
            value: None,
            keys: None,
        }
    }

    fn with_value(value: impl Into<ValueBody>) -> Self {
        ApiResponse {
            value: Some(value.into()),
            ..Self::ok()
        }
    }

    fn with_message(message: impl Into<String>) -> Self {
        ApiResponse {
            message: Some(message.into()),
            ..Self::ok()
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            message: Some(message.into()),
            value: None,
            keys: None,
        }
    }
}

/// Classify a set request into a typed value plus its TTL
///
/// Whatever was passed is stored faithfully: empty strings, zero integers
/// and empty collections are all valid values.
pub(crate) fn classify(req: SetRequest) -> Result<(Value, i64), StoreError> {
    let ttl = req.ttl;

    let value = if let Some(s) = req.string {
        Value::String(s)
    } else if let Some(i) = req.integer {
        Value::Integer(i)
    } else if let Some(xs) = req.string_list {
        Value::StringList(xs)
    } else if let Some(xs) = req.integer_list {
        Value::IntegerList(xs)
    } else if let Some(m) = req.string_map {
        Value::StringMap(m)
    } else if let Some(m) = req.integer_map {
        Value::IntegerMap(m)
    } else {
        return Err(StoreError::UnsupportedType);
    };

    Ok((value, ttl))
}

/// Map a store error to an HTTP status and response envelope
fn error_response(err: StoreError) -> (StatusCode, Json<ApiResponse>) {
    let status = match err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::WrongType { .. } => StatusCode::CONFLICT,
        StoreError::IndexOutOfRange { .. } => StatusCode::BAD_REQUEST,
        StoreError::UnsupportedType => StatusCode::BAD_REQUEST,
    };
    (status, Json(ApiResponse::failure(err.to_string())))
}

/// GET /storage - list all live keys
pub async fn list_keys(State(store): State<AppState>) -> (StatusCode, Json<ApiResponse>) {
    let keys = store.keys();
    debug!(count = keys.len(), "listing keys");

    (
        StatusCode::OK,
        Json(ApiResponse {
            keys: Some(keys),
            ..ApiResponse::ok()
        }),
    )
}

/// GET /storage/:key - fetch the whole entry for a key
pub async fn get_entry(
    State(store): State<AppState>,
    Path(key): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    debug!(%key, "get entry");

    match store.get_entry(&key) {
        Some(entry) => (StatusCode::OK, Json(ApiResponse::with_value(entry.value))),
        None => error_response(StoreError::NotFound(key)),
    }
}

/// POST /storage/:key - set a value from a weakly-typed JSON body
pub async fn set_entry(
    State(store): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SetRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    match classify(req) {
        Ok((value, ttl)) => {
            debug!(%key, variant = value.type_name(), ttl, "set entry");
            store.insert(key, value, ttl);
            (StatusCode::OK, Json(ApiResponse::with_message("stored")))
        }
        Err(err) => error_response(err),
    }
}

/// DELETE /storage/:key - remove a key
pub async fn delete_entry(
    State(store): State<AppState>,
    Path(key): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    debug!(%key, "delete entry");

    match store.remove(&key) {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::ok())),
        Err(err) => error_response(err),
    }
}

/// GET /storage/:key/index/:index - fetch one element of a stored list
pub async fn get_list_element(
    State(store): State<AppState>,
    Path((key, index)): Path<(String, usize)>,
) -> (StatusCode, Json<ApiResponse>) {
    debug!(%key, index, "get list element");

    match store.list_element(&key, index) {
        Ok(value) => (StatusCode::OK, Json(ApiResponse::with_value(value))),
        Err(err) => error_response(err),
    }
}

/// GET /storage/:key/field/:sub_key - fetch one value of a stored map
///
/// A missing sub-key is a normal empty result, served as 200 with no value.
pub async fn get_map_value(
    State(store): State<AppState>,
    Path((key, sub_key)): Path<(String, String)>,
) -> (StatusCode, Json<ApiResponse>) {
    debug!(%key, %sub_key, "get map value");

    match store.map_value(&key, &sub_key) {
        Ok(Some(value)) => (StatusCode::OK, Json(ApiResponse::with_value(value))),
        Ok(None) => (StatusCode::OK, Json(ApiResponse::ok())),
        Err(err) => error_response(err),
    }
}

/// System and store statistics response
#[derive(Debug, Serialize)]
pub struct SystemStats {
    /// Total system memory in MB
    pub total_memory_mb: f64,
    /// Used system memory in MB
    pub used_memory_mb: f64,
    /// Free system memory in MB
    pub free_memory_mb: f64,
    /// CPU usage percentage (0-100)
    pub cpu_usage: f64,
    /// Store memory usage in MB
    pub store_memory_mb: f64,
    /// Number of live keys
    pub live_keys: usize,
    /// Number of expired keys awaiting the sweeper
    pub expired_keys: usize,
}

/// GET /stats - system and store statistics
pub async fn stats_handler(State(store): State<AppState>) -> (StatusCode, Json<SystemStats>) {
    let mut sys = System::new_all();
    sys.refresh_all();

    let total_mem_bytes = sys.total_memory();
    let available_mem_bytes = sys.available_memory();
    let used_mem_bytes = total_mem_bytes - available_mem_bytes;

    let store_stats = store.stats();

    let stats = SystemStats {
        total_memory_mb: total_mem_bytes as f64 / 1024.0 / 1024.0,
        used_memory_mb: used_mem_bytes as f64 / 1024.0 / 1024.0,
        free_memory_mb: available_mem_bytes as f64 / 1024.0 / 1024.0,
        cpu_usage: sys.global_cpu_usage() as f64,
        store_memory_mb: store_stats.used_memory_bytes as f64 / 1024.0 / 1024.0,
        live_keys: store_stats.live_keys,
        expired_keys: store_stats.expired_keys,
    };

    (StatusCode::OK, Json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_variant() {
        let (value, ttl) = classify(SetRequest {
            string: Some("v".to_string()),
            ttl: 5,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value, Value::string("v"));
        assert_eq!(ttl, 5);

        let (value, _) = classify(SetRequest {
            integer: Some(0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value, Value::integer(0));

        let (value, _) = classify(SetRequest {
            integer_list: Some(vec![1, 2]),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value, Value::integer_list(vec![1, 2]));

        let (value, _) = classify(SetRequest {
            string_map: Some(HashMap::new()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value, Value::string_map(HashMap::new()));
    }

    #[test]
    fn test_classify_empty_body_is_unsupported() {
        let err = classify(SetRequest::default()).unwrap_err();
        assert_eq!(err, StoreError::UnsupportedType);
    }

    #[test]
    fn test_classify_prefers_first_populated_field() {
        let (value, _) = classify(SetRequest {
            string: Some("s".to_string()),
            integer: Some(1),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value, Value::string("s"));
    }

    #[test]
    fn test_response_envelope_json_shape() {
        let resp = ApiResponse::with_value(Value::integer_list(vec![1, 2]));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "value": { "integer_list": [1, 2] },
            })
        );

        let resp = ApiResponse::failure("key not found: k");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "message": "key not found: k",
            })
        );
    }

    #[test]
    fn test_classify_ttl_defaults_to_never() {
        let (_, ttl) = classify(SetRequest {
            string: Some("v".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ttl, 0);
    }
}
