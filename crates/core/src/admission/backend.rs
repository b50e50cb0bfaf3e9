// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock backend contract for distributed mutual exclusion
//!
//! Every mutual-exclusion implementation — in-process memory, document
//! store, Redis, ZooKeeper, etcd, or the no-op dummy — provides this
//! capability set. All operations are synchronous and may block the calling
//! thread for up to the wait budget.

use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Opaque acknowledgment returned on successful lock acquisition
///
/// The handle carries no identifying payload and is not required on
/// release: authorization on release is by holder-id match alone. That is
/// part of the backend contract, not an implementation detail of any one
/// backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockHandle {
    token: String,
}

impl LockHandle {
    /// Mint a handle with a fresh random token
    pub fn new() -> Self {
        Self {
            token: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl Default for LockHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from a lock backend
///
/// Contention is never an error: a held key surfaces as `Ok(None)` from
/// `acquire`, and a holder mismatch as `Ok(false)` from `release`. A fault
/// is a transport or connection failure from a distributed backend; the
/// in-process backends never return one.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("lock backend fault: {0}")]
    Fault(String),
}

/// The mutual-exclusion capability set
///
/// Implementations must make check-then-create atomic per key: at most one
/// live lock record per key per backend instance at any instant. A record
/// whose expiry is in the past is treated as absent and may be overwritten
/// by the next acquirer.
pub trait LockBackend: Send + Sync {
    /// One-time option setup. Idempotent per instance.
    fn configure(&self, options: &BTreeMap<String, String>) -> Result<(), BackendError>;

    /// Bind this instance to a logical provider name. Idempotent per
    /// instance.
    fn bind(&self, instance_name: &str) -> Result<(), BackendError>;

    /// Attempt to acquire `key` for `holder_id`.
    ///
    /// Returns `Ok(None)` if the key is held by someone else and remains
    /// held after the wait budget is exhausted. A zero `wait` means a
    /// single non-blocking attempt. A zero `hold` produces a lease that is
    /// already expired on the next contention check (see the reference
    /// backend).
    fn acquire(
        &self,
        holder_id: &str,
        key: &str,
        wait: Duration,
        hold: Duration,
    ) -> Result<Option<LockHandle>, BackendError>;

    /// Release `key` if `holder_id` matches the current holder.
    ///
    /// Returns `Ok(false)`, not an error, on a mismatch — including a lease
    /// that already expired and was stolen. The handle is accepted for
    /// callers that retained one but must not be used for authorization.
    fn release(
        &self,
        holder_id: &str,
        key: &str,
        handle: Option<&LockHandle>,
    ) -> Result<bool, BackendError>;

    /// Administrative override: remove the record for `key` regardless of
    /// holder. Returns whether a record was present.
    fn force_release(&self, key: &str) -> Result<bool, BackendError>;
}
