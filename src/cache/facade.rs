//! Cache Facade Module
//!
//! `Cache` wraps any `StorageHandler`, applies the default TTL, and converts
//! every handler fault into a fallback value. Faults are logged and counted,
//! never returned.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::{CacheStats, FileHandler, MemoryHandler, StatsRecorder, StorageHandler};
use crate::config::{Backend, Config};
use crate::error::{CacheError, Result};

// == Public Constants ==
/// TTL in seconds applied when a write does not specify one
pub const DEFAULT_TTL: u64 = 3600;

// == Cache ==
/// Fault-containing cache over a shared storage handler.
///
/// Cloning is cheap; clones share the handler and the statistics.
#[derive(Clone)]
pub struct Cache {
    /// Backend, possibly shared with other facades
    handler: Arc<dyn StorageHandler>,
    /// TTL in seconds for writes without an explicit TTL
    default_ttl: u64,
    /// Hit, miss, and fault counters
    stats: Arc<StatsRecorder>,
}

impl Cache {
    // == Constructors ==
    /// Creates a facade over `handler` with the given default TTL in seconds.
    pub fn new(handler: Arc<dyn StorageHandler>, default_ttl: u64) -> Self {
        Self {
            handler,
            default_ttl,
            stats: Arc::new(StatsRecorder::new()),
        }
    }

    /// Creates a facade over a `FileHandler` rooted at `<temp dir>/filecache`
    /// with the given default TTL in seconds.
    pub fn with_default_ttl(default_ttl: u64) -> Result<Self> {
        Ok(Self::new(Arc::new(FileHandler::in_temp_dir()?), default_ttl))
    }

    /// Same as `with_default_ttl(DEFAULT_TTL)`.
    pub fn in_temp_dir() -> Result<Self> {
        Self::with_default_ttl(DEFAULT_TTL)
    }

    /// Creates a facade with the backend and default TTL from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let handler: Arc<dyn StorageHandler> = match config.backend {
            Backend::File => Arc::new(FileHandler::new(&config.cache_dir)?),
            Backend::Memory => Arc::new(MemoryHandler::new()),
        };
        Ok(Self::new(handler, config.default_ttl))
    }

    /// Returns the TTL applied when a write omits one.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// Returns the underlying handler.
    pub fn handler(&self) -> &Arc<dyn StorageHandler> {
        &self.handler
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    // == Fault Boundary ==
    /// Passes `Ok` through; logs and counts an `Err` and yields `None`.
    fn contain<T>(&self, op: &'static str, key: Option<&str>, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.stats.record_fault();
                warn!(op, key = ?key, error = %e, "Cache operation failed");
                None
            }
        }
    }

    // == Get ==
    /// Returns the live value for `key`, or `default` if it is absent,
    /// expired, not a `T`, or the backend fails.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let fetched = self.handler.get(key).and_then(|found| match found {
            Some(value) => Ok(Some(serde_json::from_value::<T>(value)?)),
            None => Ok(None),
        });

        match self.contain("get", Some(key), fetched).flatten() {
            Some(value) => {
                self.stats.record_hit();
                debug!(key = %key, "Cache hit");
                value
            }
            None => {
                self.stats.record_miss();
                debug!(key = %key, "Cache miss");
                default
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl` seconds, or the default TTL if
    /// `None`. Returns false if the write did not complete.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: Option<u64>) -> bool {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let result = serde_json::to_value(value)
            .map_err(CacheError::from)
            .and_then(|value| self.handler.set(key, value, ttl));

        self.contain("set", Some(key), result).is_some()
    }

    // == Delete ==
    /// Removes `key`. Returns true if it is gone, including when it never existed.
    pub fn delete(&self, key: &str) -> bool {
        let result = self.handler.delete(key);
        self.contain("delete", Some(key), result).is_some()
    }

    // == Clear ==
    /// Removes every entry. Returns false if the sweep did not complete.
    pub fn clear(&self) -> bool {
        let result = self.handler.clear();
        match self.contain("clear", None, result) {
            Some(removed) => {
                debug!(removed, "Cache cleared");
                true
            }
            None => false,
        }
    }

    // == Has ==
    /// Returns true if `key` has a live entry; false on absence, expiry, or fault.
    pub fn has(&self, key: &str) -> bool {
        let result = self.handler.has(key);
        self.contain("has", Some(key), result).unwrap_or(false)
    }

    // == Bulk Operations ==
    /// Reads each key independently, yielding one result per distinct key.
    pub fn get_multiple<I, K, T>(&self, keys: I, default: T) -> HashMap<String, T>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
        T: DeserializeOwned + Clone,
    {
        keys.into_iter()
            .map(|key| {
                let key = key.as_ref();
                (key.to_string(), self.get(key, default.clone()))
            })
            .collect()
    }

    /// Writes each entry independently under one TTL. A failed entry does not
    /// stop the rest; returns true only if every write completed.
    pub fn set_multiple<I, K, V>(&self, entries: I, ttl: Option<u64>) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Serialize,
    {
        let ttl = Some(ttl.unwrap_or(self.default_ttl));
        let mut all_stored = true;
        for (key, value) in entries {
            if !self.set(key.as_ref(), &value, ttl) {
                all_stored = false;
            }
        }
        all_stored
    }

    /// Deletes each key independently; returns true only if every delete completed.
    pub fn delete_multiple<I, K>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut all_deleted = true;
        for key in keys {
            if !self.delete(key.as_ref()) {
                all_deleted = false;
            }
        }
        all_deleted
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("default_ttl", &self.default_ttl)
            .field("stats", &self.stats.snapshot())
            .finish_non_exhaustive()
    }
}
