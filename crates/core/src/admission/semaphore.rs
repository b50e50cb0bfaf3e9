// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Semaphore configuration model
//!
//! The configuration is a small structured document authored once with the
//! workflow definition and read at every admission attempt, e.g.
//! `{"maxAllowed": 15}` or `{"maxAllowed": 15, "propertyName": "strategy"}`.
//! Which variant it deserializes into decides the scoping strategy:
//! workflow-scoped pools are keyed by the workflow identity alone,
//! property-scoped pools cross the workflow identity with a property value
//! resolved at admission time (e.g. one pool per customer).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Capacity and scoping strategy for one workflow's permit pools
// Untagged: the property-scoped variant must come first, it is the stricter
// match ({"maxAllowed": ..} alone deserializes as workflow-scoped)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SemaphoreConfig {
    /// One pool per workflow identity crossed with a property value
    PropertyScoped(PropertyScopedConfig),
    /// One pool per workflow identity
    WorkflowScoped(WorkflowScopedConfig),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowScopedConfig {
    pub max_allowed: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyScopedConfig {
    pub max_allowed: u32,
    pub property_name: String,
}

impl SemaphoreConfig {
    pub fn workflow_scoped(max_allowed: u32) -> Self {
        Self::WorkflowScoped(WorkflowScopedConfig { max_allowed })
    }

    pub fn property_scoped(max_allowed: u32, property_name: impl Into<String>) -> Self {
        Self::PropertyScoped(PropertyScopedConfig {
            max_allowed,
            property_name: property_name.into(),
        })
    }

    /// Cap on concurrently admitted work orders within one scope
    pub fn max_allowed(&self) -> u32 {
        match self {
            Self::PropertyScoped(config) => config.max_allowed,
            Self::WorkflowScoped(config) => config.max_allowed,
        }
    }
}

/// Budgets for permit acquisition and retention
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSettings {
    /// Lease on each granted permit; an unreleased permit (crashed holder)
    /// becomes stealable once it elapses
    #[serde(with = "humantime_serde")]
    pub permit_hold: Duration,
    /// How long admission may block waiting for capacity; zero means a
    /// single non-blocking attempt
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            permit_hold: Duration::from_secs(24 * 60 * 60),
            acquire_timeout: Duration::ZERO,
        }
    }
}

impl PoolSettings {
    pub fn with_permit_hold(mut self, hold: Duration) -> Self {
        self.permit_hold = hold;
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

#[cfg(test)]
#[path = "semaphore_tests.rs"]
mod tests;
