//! workgate-core: admission control for workflow work orders
//!
//! This crate provides:
//! - A lock-backend contract for distributed mutual exclusion, with an
//!   in-process reference implementation, a no-op dummy, and a registry
//!   that resolves parsed provider configuration to cached instances
//! - Scope-key derivation giving each capacity scope an independent pool
//! - A counting permit pool built from single-holder mutexes, used by the
//!   workflow engine to gate work-order admission

pub mod admission;
pub mod clock;

// Re-exports
pub use admission::{
    Admission, AdmissionError, AdmissionGate, AdmissionResult, BackendError, BackendRegistry,
    BackendType, DummyBackend, LockBackend, LockHandle, MemoryBackend, PermitId, PermitPool,
    PoolSettings, ProviderConfig, RegistryError, ScopeError, SemaphoreConfig,
};
pub use clock::{Clock, FakeClock, SystemClock};
