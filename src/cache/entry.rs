//! Cache Record Module
//!
//! Defines the persisted `{value, expires_at}` record with TTL support.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{de::IgnoredAny, Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CacheError, Result};

// == Cache Record ==
/// A stored value together with its absolute expiration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// The stored value
    pub value: Value,
    /// Absolute expiration time, fixed at write time
    pub expires_at: DateTime<Utc>,
}

impl CacheRecord {
    // == Constructor ==
    /// Creates a record that expires `ttl_seconds` from now.
    ///
    /// A TTL of 0 produces a record that is already expired.
    ///
    /// # Errors
    /// `CacheError::InvalidTtl` if `now + ttl_seconds` overflows the timestamp range.
    pub fn new(value: Value, ttl_seconds: u64) -> Result<Self> {
        let expires_at = expiry_from_now(ttl_seconds)?;
        Ok(Self { value, expires_at })
    }

    // == Is Expired ==
    /// Checks if the record has expired.
    ///
    /// A record is expired once the current time reaches `expires_at`.
    pub fn is_expired(&self) -> bool {
        is_past(self.expires_at)
    }

    // == Time To Live ==
    /// Returns remaining TTL in whole seconds, 0 once expired.
    pub fn ttl_remaining(&self) -> u64 {
        let remaining = self.expires_at - Utc::now();
        remaining.num_seconds().max(0) as u64
    }
}

// == Record Header ==
/// Expiration-only view of a record; the value is parsed but never built.
#[derive(Debug, Deserialize)]
pub(crate) struct RecordHeader {
    #[allow(dead_code)]
    value: IgnoredAny,
    pub expires_at: DateTime<Utc>,
}

impl RecordHeader {
    pub fn is_expired(&self) -> bool {
        is_past(self.expires_at)
    }
}

// == Utility Functions ==
/// Computes `now + ttl_seconds`, rejecting TTLs outside the representable range.
pub fn expiry_from_now(ttl_seconds: u64) -> Result<DateTime<Utc>> {
    i64::try_from(ttl_seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or(CacheError::InvalidTtl(ttl_seconds))
}

fn is_past(deadline: DateTime<Utc>) -> bool {
    Utc::now() >= deadline
}
