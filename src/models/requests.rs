//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies. Values are
//! arbitrary JSON.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store
/// - `ttl`: Optional TTL in seconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Request body for POST /get-multiple
#[derive(Debug, Clone, Deserialize)]
pub struct GetMultipleRequest {
    /// Keys to read
    pub keys: Vec<String>,
    /// Value returned for keys without a live entry
    #[serde(default)]
    pub default: Value,
}

/// Request body for PUT /set-multiple
#[derive(Debug, Clone, Deserialize)]
pub struct SetMultipleRequest {
    /// Key-value pairs to store
    pub entries: Map<String, Value>,
    /// Optional TTL in seconds applied to every entry
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Request body for POST /delete-multiple
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteMultipleRequest {
    /// Keys to delete
    pub keys: Vec<String>,
}
