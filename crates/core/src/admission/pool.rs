// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Permit pool: the admission-control algorithm
//!
//! Turns a fixed number of single-holder mutexes into a counting semaphore.
//! Each scope owns `max_allowed` permit slots; a slot is backed by one
//! lock-record key `{scope_key}/{slot}`. Admission scans the slots in fixed
//! ascending order and wins the first free one. There is no FIFO guarantee
//! across competing callers: a later request can win a low-numbered slot
//! before an earlier, still-scanning request reaches it.

use super::backend::{BackendError, LockBackend};
use super::permit::{AdmissionResult, PermitId, PermitIdError};
use super::scope::ScopeError;
use super::semaphore::PoolSettings;
use crate::clock::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors from admission operations
///
/// Capacity exhaustion is not among them: a full pool is a normal
/// `AdmissionResult` with `is_acquired: false`, and releasing a permit that
/// is no longer held is a normal `Ok(false)`.
#[derive(Debug, Error)]
pub enum AdmissionError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error(transparent)]
    Permit(#[from] PermitIdError),
}

/// A counting permit pool over one lock backend
pub struct PermitPool<C: Clock> {
    backend: Arc<dyn LockBackend>,
    max_allowed: u32,
    settings: PoolSettings,
    clock: C,
}

impl<C: Clock> PermitPool<C> {
    pub fn new(
        backend: Arc<dyn LockBackend>,
        max_allowed: u32,
        settings: PoolSettings,
        clock: C,
    ) -> Self {
        Self {
            backend,
            max_allowed,
            settings,
            clock,
        }
    }

    /// One bounded scan over the slots
    ///
    /// The holder id is unique per admission attempt, not per slot.
    /// Exhausting every slot is the expected no-capacity outcome.
    pub fn try_acquire_permit(
        &self,
        workflow_id: &str,
        attempt_millis: i64,
        scope_key: &str,
    ) -> Result<AdmissionResult, AdmissionError> {
        let holder_id = format!("{workflow_id}:{attempt_millis}");
        for slot in 0..self.max_allowed {
            let key = format!("{scope_key}/{slot}");
            let handle = self.backend.acquire(
                &holder_id,
                &key,
                Duration::ZERO,
                self.settings.permit_hold,
            )?;
            if handle.is_some() {
                tracing::debug!(scope = %scope_key, slot, "permit acquired");
                return Ok(AdmissionResult::acquired(PermitId::new(
                    workflow_id,
                    attempt_millis,
                    slot,
                )));
            }
        }
        tracing::debug!(
            scope = %scope_key,
            max_allowed = self.max_allowed,
            "no permit slot available"
        );
        Ok(AdmissionResult::denied())
    }

    /// Blocking variant: re-run the scan at 1-second granularity until a
    /// permit is granted or `timeout` elapses
    pub fn acquire_permit(
        &self,
        workflow_id: &str,
        attempt_millis: i64,
        scope_key: &str,
        timeout: Duration,
    ) -> Result<AdmissionResult, AdmissionError> {
        let deadline = self.clock.now_millis() + timeout.as_millis() as i64;
        loop {
            let result = self.try_acquire_permit(workflow_id, attempt_millis, scope_key)?;
            if result.is_acquired || self.clock.now_millis() >= deadline {
                return Ok(result);
            }
            self.clock.sleep(Duration::from_secs(1));
        }
    }

    /// Release a granted permit
    ///
    /// Idempotent: a permit whose lease already expired and was stolen, or
    /// one released before, is a silent no-op reported as `Ok(false)`.
    pub fn release_permit(
        &self,
        permit_id: &str,
        scope_key: &str,
    ) -> Result<bool, AdmissionError> {
        let permit: PermitId = permit_id.parse()?;
        let released =
            self.backend
                .release(&permit.holder_id(), &permit.lock_key(scope_key), None)?;
        if !released {
            tracing::debug!(
                permit = %permit_id,
                scope = %scope_key,
                "permit no longer held, release is a no-op"
            );
        }
        Ok(released)
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
