//! Shared helpers for admission specs.

use std::collections::BTreeMap;
use workgate_core::{
    AdmissionGate, BackendRegistry, BackendType, FakeClock, PoolSettings, ProviderConfig,
};

/// Logical provider backing the permit pools in these specs
pub const SEMAPHORE_PROVIDER: &str = "lock://semaphore";

pub struct Specs {
    pub clock: FakeClock,
    pub registry: BackendRegistry,
    pub gate: AdmissionGate<FakeClock>,
}

pub fn specs() -> Specs {
    specs_with_settings(PoolSettings::default())
}

pub fn specs_with_settings(settings: PoolSettings) -> Specs {
    let clock = FakeClock::new();
    let registry = BackendRegistry::with_clock(clock.clone());
    let backend = registry
        .resolve(SEMAPHORE_PROVIDER, &ProviderConfig::new(BackendType::Memory))
        .unwrap();
    let gate = AdmissionGate::new(backend, settings, clock.clone());
    Specs {
        clock,
        registry,
        gate,
    }
}

pub fn properties(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
