//! Filecache - a file-backed key-value cache
//!
//! Stores one record per key with lazy TTL expiration behind a pluggable
//! storage handler, wrapped by a facade that never surfaces backend faults.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{Cache, FileHandler, MemoryHandler, StorageHandler};
pub use config::Config;
pub use error::CacheError;
