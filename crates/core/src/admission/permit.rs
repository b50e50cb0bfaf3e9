// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Acquired-permit identifiers
//!
//! A granted permit is externally visible as a URI-like string the caller
//! retains and presents on release: `{workflow_id}/{attempt_millis}#{slot}`.
//! Embedding the attempt timestamp lets release reconstruct the slot lock's
//! holder id from the permit id alone, so the pool keeps no state of its
//! own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of one granted permit
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PermitId {
    workflow_id: String,
    attempt_millis: i64,
    slot: u32,
}

impl PermitId {
    pub fn new(workflow_id: impl Into<String>, attempt_millis: i64, slot: u32) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            attempt_millis,
            slot,
        }
    }

    pub fn workflow_id(&self) -> &str {
        &self.workflow_id
    }

    pub fn attempt_millis(&self) -> i64 {
        self.attempt_millis
    }

    /// Permit slot index within the scope, `0..max_allowed`
    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Holder id under which the backing slot lock was acquired: unique per
    /// admission attempt, not per slot
    pub fn holder_id(&self) -> String {
        format!("{}:{}", self.workflow_id, self.attempt_millis)
    }

    /// Backing lock-record key within the given scope
    pub fn lock_key(&self, scope_key: &str) -> String {
        format!("{}/{}", scope_key, self.slot)
    }
}

impl fmt::Display for PermitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.workflow_id, self.attempt_millis, self.slot)
    }
}

/// A permit id that does not parse back into workflow id, attempt
/// timestamp, and slot
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed permit id: {0}")]
pub struct PermitIdError(pub String);

impl FromStr for PermitId {
    type Err = PermitIdError;

    // Both separators split from the right: the workflow id itself may
    // contain '/' (URI-style identities)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PermitIdError(s.to_string());
        let (rest, slot) = s.rsplit_once('#').ok_or_else(malformed)?;
        let slot = slot.parse().map_err(|_| malformed())?;
        let (workflow_id, attempt) = rest.rsplit_once('/').ok_or_else(malformed)?;
        let attempt_millis = attempt.parse().map_err(|_| malformed())?;
        if workflow_id.is_empty() {
            return Err(malformed());
        }
        Ok(Self {
            workflow_id: workflow_id.to_string(),
            attempt_millis,
            slot,
        })
    }
}

impl From<PermitId> for String {
    fn from(id: PermitId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for PermitId {
    type Error = PermitIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Outcome of one admission attempt
///
/// A full pool is the expected no-capacity outcome, reported as
/// `is_acquired: false` — never as an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionResult {
    pub is_acquired: bool,
    pub acquired_permit_id: Option<PermitId>,
}

impl AdmissionResult {
    pub fn acquired(permit: PermitId) -> Self {
        Self {
            is_acquired: true,
            acquired_permit_id: Some(permit),
        }
    }

    pub fn denied() -> Self {
        Self {
            is_acquired: false,
            acquired_permit_id: None,
        }
    }
}

#[cfg(test)]
#[path = "permit_tests.rs"]
mod tests;
