// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scope-key derivation
//!
//! A scope key is the canonical identity of one scope's independent permit
//! pool. Derivation is a pure function of the semaphore configuration, the
//! workflow identity, and — for property-scoped pools — the property value
//! resolved from the caller's property map. Equal scope always derives the
//! equal key; a different workflow identity or property value always
//! derives a different key.

use super::semaphore::SemaphoreConfig;
use std::collections::BTreeMap;
use thiserror::Error;

/// Configuration errors raised during derivation, before any lock operation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScopeError {
    /// Property-scoped configuration, but the caller's property map has no
    /// such property
    #[error("property {0} is not defined and property-based scoping is in force")]
    MissingProperty(String),
    #[error("semaphore configuration is not serializable: {0}")]
    Unserializable(String),
}

/// Derive the canonical key identifying one scope's permit pool
///
/// A malformed call fails here, before any lock state could be created.
pub fn scope_key(
    config: &SemaphoreConfig,
    workflow_id: &str,
    properties: &BTreeMap<String, String>,
) -> Result<String, ScopeError> {
    let digest = config_digest(config)?;
    match config {
        SemaphoreConfig::WorkflowScoped(_) => Ok(format!("workflow/{digest:08x}/{workflow_id}")),
        SemaphoreConfig::PropertyScoped(scoped) => {
            let value = properties
                .get(&scoped.property_name)
                .ok_or_else(|| ScopeError::MissingProperty(scoped.property_name.clone()))?;
            Ok(format!("property/{digest:08x}/{workflow_id}/{value}"))
        }
    }
}

/// crc32 of the canonical JSON serialization, so configurations that differ
/// (even in capacity alone) never share a pool
fn config_digest(config: &SemaphoreConfig) -> Result<u32, ScopeError> {
    let json = serde_json::to_string(config)
        .map_err(|e| ScopeError::Unserializable(e.to_string()))?;
    Ok(crc32fast::hash(json.as_bytes()))
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
