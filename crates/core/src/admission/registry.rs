// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backend registry: parsed provider configuration to running instances
//!
//! The textual configuration grammar (`USING MEMORY { option=value, ... }`)
//! is parsed by an external collaborator; the registry consumes the parsed
//! `{type, options}` pair. Backend types form a closed set. Constructors
//! for the in-process types are built in; the distributed types are
//! external collaborators whose constructors the embedding process
//! installs. One instance is cached per logical provider — first successful
//! lookup wins, no eviction or refresh.

use super::backend::{BackendError, LockBackend};
use super::dummy::DummyBackend;
use super::memory::MemoryBackend;
use crate::clock::{Clock, SystemClock};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// The closed set of lock backend types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendType {
    #[serde(rename = "MEMORY")]
    Memory,
    #[serde(rename = "MONGODB")]
    MongoDb,
    #[serde(rename = "REDIS")]
    Redis,
    #[serde(rename = "ZOOKEEPER")]
    ZooKeeper,
    #[serde(rename = "ETCD")]
    Etcd,
    #[serde(rename = "DUMMY")]
    Dummy,
}

impl BackendType {
    /// Keyword used by the `USING <TYPE>` configuration grammar
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Memory => "MEMORY",
            Self::MongoDb => "MONGODB",
            Self::Redis => "REDIS",
            Self::ZooKeeper => "ZOOKEEPER",
            Self::Etcd => "ETCD",
            Self::Dummy => "DUMMY",
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for BackendType {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MEMORY" => Ok(Self::Memory),
            "MONGODB" => Ok(Self::MongoDb),
            "REDIS" => Ok(Self::Redis),
            "ZOOKEEPER" => Ok(Self::ZooKeeper),
            "ETCD" => Ok(Self::Etcd),
            "DUMMY" => Ok(Self::Dummy),
            other => Err(RegistryError::UnknownBackendType(other.to_string())),
        }
    }
}

/// Parsed backend selection: the `{type, options}` pair produced from
/// `USING <TYPE> { option=value, ... }`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(rename = "type")]
    pub backend_type: BackendType,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl ProviderConfig {
    pub fn new(backend_type: BackendType) -> Self {
        Self {
            backend_type,
            options: BTreeMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Configuration errors raised at registry lookup, before any lock I/O
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A keyword outside the closed backend-type set
    #[error("unknown lock backend type: {0}")]
    UnknownBackendType(String),
    /// A known type whose constructor is not installed in this process
    #[error("no constructor installed for lock backend type {0}")]
    UnavailableBackend(BackendType),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Builds a backend instance from parsed provider configuration
pub type BackendConstructor =
    Box<dyn Fn(&ProviderConfig) -> Result<Arc<dyn LockBackend>, BackendError> + Send + Sync>;

/// Owns backend construction and the per-provider instance cache
///
/// An explicitly owned value, passed to whoever performs admission; there
/// is no process-global registry.
pub struct BackendRegistry {
    constructors: HashMap<BackendType, BackendConstructor>,
    instances: Mutex<HashMap<String, Arc<dyn LockBackend>>>,
}

impl BackendRegistry {
    /// Registry with the built-in in-process constructors, reading the
    /// system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Registry with built-ins driven by the given clock
    pub fn with_clock<C: Clock + 'static>(clock: C) -> Self {
        let mut registry = Self {
            constructors: HashMap::new(),
            instances: Mutex::new(HashMap::new()),
        };
        registry.install(
            BackendType::Memory,
            Box::new(move |_| Ok(Arc::new(MemoryBackend::new(clock.clone())) as Arc<dyn LockBackend>)),
        );
        registry.install(
            BackendType::Dummy,
            Box::new(|_| Ok(Arc::new(DummyBackend) as Arc<dyn LockBackend>)),
        );
        registry
    }

    /// Install or replace the constructor for a backend type
    pub fn install(&mut self, backend_type: BackendType, constructor: BackendConstructor) {
        self.constructors.insert(backend_type, constructor);
    }

    /// Resolve a provider to its backend instance, constructing, configuring
    /// and binding it on first lookup
    pub fn resolve(
        &self,
        provider: &str,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn LockBackend>, RegistryError> {
        let mut instances = self.instances.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(instance) = instances.get(provider) {
            return Ok(Arc::clone(instance));
        }
        let constructor = self
            .constructors
            .get(&config.backend_type)
            .ok_or(RegistryError::UnavailableBackend(config.backend_type))?;
        let instance = constructor(config)?;
        instance.configure(&config.options)?;
        instance.bind(provider)?;
        instances.insert(provider.to_string(), Arc::clone(&instance));
        tracing::debug!(
            provider = %provider,
            backend = %config.backend_type,
            "lock backend instantiated"
        );
        Ok(instance)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
