//! Error types for the cache
//!
//! Storage handlers report faults through `CacheError`; the facade converts
//! them into fallback values, so only the HTTP layer ever renders one.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for storage handlers and the server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backing store unreachable, permission denied, disk full
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored record is corrupt or has an incompatible format
    #[error("Corrupt record at {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be encoded, or a stored value does not match the requested type
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Empty or oversized key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// TTL too large to be represented as an expiration timestamp
    #[error("Invalid TTL: {0} seconds")]
    InvalidTtl(u64),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidKey(_) | CacheError::InvalidTtl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
