// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! Lock leases are stored as wall-clock epoch millis, so the clock reads
//! epoch time rather than a monotonic instant. Sleeping also goes through
//! the clock, so the 1-second acquire poll can run in tests without real
//! delay.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A clock that provides the current wall-clock time and can sleep
pub trait Clock: Clone + Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;

    /// Block the calling thread for the given duration
    fn sleep(&self, duration: Duration);
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Fake clock for testing with controllable time
///
/// `sleep` advances the clock instead of blocking, so wait budgets elapse
/// immediately in tests.
#[derive(Clone)]
pub struct FakeClock {
    current_millis: Arc<Mutex<i64>>,
}

/// 2023-11-14T22:13:20Z; a nonzero start so that a zero expiry is in the past
const DEFAULT_START_MILLIS: i64 = 1_700_000_000_000;

impl FakeClock {
    pub fn new() -> Self {
        Self::at(DEFAULT_START_MILLIS)
    }

    /// Start the clock at a specific epoch time
    pub fn at(start_millis: i64) -> Self {
        Self {
            current_millis: Arc::new(Mutex::new(start_millis)),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current_millis.lock().unwrap_or_else(|e| e.into_inner());
        *current += duration.as_millis() as i64;
    }

    /// Set the clock to a specific epoch time
    pub fn set_millis(&self, millis: i64) {
        let mut current = self.current_millis.lock().unwrap_or_else(|e| e.into_inner());
        *current = millis;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now_millis(&self) -> i64 {
        *self.current_millis.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
