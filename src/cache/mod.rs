//! Cache Module
//!
//! Provides the storage handler contract, file and memory handlers with lazy
//! TTL expiration, and the fault-containing `Cache` facade.

mod entry;
mod facade;
mod file;
mod handler;
mod memory;
mod stats;


// Re-export public types
pub use entry::CacheRecord;
pub use facade::{Cache, DEFAULT_TTL};
pub use file::{FileHandler, RECORD_EXTENSION};
pub use handler::StorageHandler;
pub use memory::MemoryHandler;
pub use stats::{CacheStats, StatsRecorder};

use crate::error::{CacheError, Result};

// == Key Validation ==
/// Rejects empty keys. Any other string maps to a fixed-length location.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key cannot be empty".to_string()));
    }
    Ok(())
}
