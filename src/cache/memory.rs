//! Memory Storage Handler
//!
//! In-process map backend with the same lazy expiration as `FileHandler`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use crate::cache::{validate_key, CacheRecord, StorageHandler};
use crate::error::{CacheError, Result};

// == Memory Handler ==
/// Storage handler keeping records in a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryHandler {
    /// Key-record storage
    entries: Mutex<HashMap<String, CacheRecord>>,
}

impl MemoryHandler {
    // == Constructor ==
    /// Creates an empty handler.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, CacheRecord>>> {
        self.entries
            .lock()
            .map_err(|_| CacheError::Internal("memory store lock poisoned".to_string()))
    }

    // == Length ==
    /// Returns the number of stored records, expired ones included.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    // == Is Empty ==
    /// Returns true if no records are stored.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl StorageHandler for MemoryHandler {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        validate_key(key)?;
        let mut entries = self.lock()?;

        match entries.get(key) {
            Some(record) if record.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(record) => Ok(Some(record.value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: Value, ttl_seconds: u64) -> Result<()> {
        validate_key(key)?;
        let record = CacheRecord::new(value, ttl_seconds)?;
        self.lock()?.insert(key.to_string(), record);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.lock()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<usize> {
        let mut entries = self.lock()?;
        let removed = entries.len();
        entries.clear();
        Ok(removed)
    }

    fn has(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let mut entries = self.lock()?;

        match entries.get(key) {
            Some(record) if record.is_expired() => {
                entries.remove(key);
                Ok(false)
            }
            Some(_) => Ok(true),
            None => Ok(false),
        }
    }
}
