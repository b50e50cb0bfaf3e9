// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reference in-process lock backend
//!
//! A single mutex guards the whole key map and every operation serializes
//! through it; that is what makes check-then-create atomic. Correct within
//! one process only. This is the default/testing backend and the contract
//! distributed backends must match with their own compare-and-set or
//! transaction primitives.

use super::backend::{BackendError, LockBackend, LockHandle};
use crate::clock::Clock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::Duration;

/// One live lock record per key
#[derive(Clone, Debug)]
struct LockRecord {
    holder_id: String,
    expires_at_millis: i64,
}

impl LockRecord {
    /// An expired record is treated as absent and may be stolen. A zero
    /// expiry (hold of zero) is always in the past, so such a lock confers
    /// no real exclusivity against a second claimant.
    fn is_expired(&self, now_millis: i64) -> bool {
        self.expires_at_millis < now_millis
    }
}

/// In-process lease-based lock backend
pub struct MemoryBackend<C: Clock> {
    clock: C,
    records: Mutex<HashMap<String, LockRecord>>,
}

impl<C: Clock> MemoryBackend<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// One atomic check-then-create attempt
    fn try_acquire_once(&self, holder_id: &str, key: &str, hold: Duration) -> Option<LockHandle> {
        let now = self.clock.now_millis();
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(record) = records.get(key) {
            if !record.is_expired(now) {
                return None;
            }
            tracing::debug!(
                key = %key,
                previous_holder = %record.holder_id,
                "expired lock record superseded"
            );
        }
        let expires_at_millis = if hold.is_zero() {
            0
        } else {
            now + hold.as_millis() as i64
        };
        records.insert(
            key.to_string(),
            LockRecord {
                holder_id: holder_id.to_string(),
                expires_at_millis,
            },
        );
        Some(LockHandle::new())
    }
}

impl<C: Clock> LockBackend for MemoryBackend<C> {
    fn configure(&self, _options: &BTreeMap<String, String>) -> Result<(), BackendError> {
        Ok(())
    }

    fn bind(&self, _instance_name: &str) -> Result<(), BackendError> {
        Ok(())
    }

    fn acquire(
        &self,
        holder_id: &str,
        key: &str,
        wait: Duration,
        hold: Duration,
    ) -> Result<Option<LockHandle>, BackendError> {
        if let Some(handle) = self.try_acquire_once(holder_id, key, hold) {
            return Ok(Some(handle));
        }
        // Bounded poll at 1-second granularity: `wait` further attempts
        for _ in 0..wait.as_secs() {
            self.clock.sleep(Duration::from_secs(1));
            if let Some(handle) = self.try_acquire_once(holder_id, key, hold) {
                return Ok(Some(handle));
            }
        }
        Ok(None)
    }

    fn release(
        &self,
        holder_id: &str,
        key: &str,
        _handle: Option<&LockHandle>,
    ) -> Result<bool, BackendError> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let holder_matches = records
            .get(key)
            .is_some_and(|record| record.holder_id == holder_id);
        if holder_matches {
            records.remove(key);
        }
        Ok(holder_matches)
    }

    fn force_release(&self, key: &str) -> Result<bool, BackendError> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records.remove(key).is_some())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
