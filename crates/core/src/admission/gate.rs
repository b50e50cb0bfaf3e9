// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine-facing admission facade
//!
//! The workflow engine asks the gate to admit a work order before
//! transitioning it to running, and releases the granted permit exactly
//! once when the work order reaches a terminal state. The gate derives the
//! scope key first — a malformed call fails before any lock state is
//! created — then runs the pool's slot scan, blocking or not per the
//! configured acquire timeout. The caller retains the scope key alongside
//! the permit id and presents both at release.

use super::backend::LockBackend;
use super::permit::AdmissionResult;
use super::pool::{AdmissionError, PermitPool};
use super::scope::scope_key;
use super::semaphore::{PoolSettings, SemaphoreConfig};
use crate::clock::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Outcome of an admission request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Admission {
    /// Identity of the scope's pool; required again at release
    pub scope_key: String,
    pub result: AdmissionResult,
}

/// Admission control over one lock backend
pub struct AdmissionGate<C: Clock> {
    backend: Arc<dyn LockBackend>,
    settings: PoolSettings,
    clock: C,
}

impl<C: Clock> AdmissionGate<C> {
    pub fn new(backend: Arc<dyn LockBackend>, settings: PoolSettings, clock: C) -> Self {
        Self {
            backend,
            settings,
            clock,
        }
    }

    /// Try to admit one work order under the workflow's semaphore
    /// configuration
    pub fn admit(
        &self,
        config: &SemaphoreConfig,
        workflow_id: &str,
        properties: &BTreeMap<String, String>,
    ) -> Result<Admission, AdmissionError> {
        let scope = scope_key(config, workflow_id, properties)?;
        let pool = self.pool(config.max_allowed());
        let attempt_millis = self.clock.now_millis();
        let result = if self.settings.acquire_timeout.is_zero() {
            pool.try_acquire_permit(workflow_id, attempt_millis, &scope)?
        } else {
            pool.acquire_permit(
                workflow_id,
                attempt_millis,
                &scope,
                self.settings.acquire_timeout,
            )?
        };
        Ok(Admission {
            scope_key: scope,
            result,
        })
    }

    /// Release a granted permit once its work order reaches a terminal
    /// state (completed, failed, or cancelled). Idempotent.
    pub fn release(
        &self,
        config: &SemaphoreConfig,
        permit_id: &str,
        scope_key: &str,
    ) -> Result<bool, AdmissionError> {
        self.pool(config.max_allowed())
            .release_permit(permit_id, scope_key)
    }

    fn pool(&self, max_allowed: u32) -> PermitPool<C> {
        PermitPool::new(
            Arc::clone(&self.backend),
            max_allowed,
            self.settings.clone(),
            self.clock.clone(),
        )
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
