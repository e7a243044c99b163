//! Storage Handler Contract
//!
//! The capability every backend provides to the `Cache` facade.

use serde_json::Value;

use crate::error::Result;

// == Storage Handler ==
/// Durable per-key storage of values with an absolute expiration time.
///
/// Handlers expire lazily: an expired record is reported as absent the first
/// time it is read and may be removed at that point. Handlers report faults
/// as `Err`; containment is the facade's job.
pub trait StorageHandler: Send + Sync {
    /// Returns the live value for `key`, or `None` if absent or expired.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous record.
    ///
    /// A `ttl_seconds` of 0 stores a record that is already expired.
    fn set(&self, key: &str, value: Value, ttl_seconds: u64) -> Result<()>;

    /// Removes the record for `key`. Removing an absent key succeeds.
    fn delete(&self, key: &str) -> Result<()>;

    /// Removes every record owned by this handler, expired or not.
    ///
    /// Returns the number of records removed.
    fn clear(&self) -> Result<usize>;

    /// Reports whether `key` has a live record.
    fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}
