// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op lock backend that always grants
//!
//! Keeps semaphore configuration in place without any real mutual
//! exclusion, e.g. for single-node development. Every acquire succeeds, so
//! a pool on this backend always grants slot 0 and never limits anything.

use super::backend::{BackendError, LockBackend, LockHandle};
use std::collections::BTreeMap;
use std::time::Duration;

/// Always-grant backend
#[derive(Clone, Copy, Debug, Default)]
pub struct DummyBackend;

impl LockBackend for DummyBackend {
    fn configure(&self, _options: &BTreeMap<String, String>) -> Result<(), BackendError> {
        Ok(())
    }

    fn bind(&self, _instance_name: &str) -> Result<(), BackendError> {
        Ok(())
    }

    fn acquire(
        &self,
        _holder_id: &str,
        _key: &str,
        _wait: Duration,
        _hold: Duration,
    ) -> Result<Option<LockHandle>, BackendError> {
        Ok(Some(LockHandle::new()))
    }

    fn release(
        &self,
        _holder_id: &str,
        _key: &str,
        _handle: Option<&LockHandle>,
    ) -> Result<bool, BackendError> {
        Ok(true)
    }

    fn force_release(&self, _key: &str) -> Result<bool, BackendError> {
        Ok(true)
    }
}

#[cfg(test)]
#[path = "dummy_tests.rs"]
mod tests;
