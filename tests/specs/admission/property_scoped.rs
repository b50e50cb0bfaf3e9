//! End-to-end admission over a property-scoped semaphore.

use crate::prelude::*;
use workgate_core::{AdmissionError, PermitId, ScopeError, SemaphoreConfig};

const WORKFLOW: &str = "workflow://auth/test";
const MAX_ALLOWED: u32 = 15;
const NUM_REMOVE: usize = 5;

fn config() -> SemaphoreConfig {
    serde_json::from_str(r#"{"maxAllowed": 15, "propertyName": "strategy"}"#).unwrap()
}

#[test]
fn missing_property_is_rejected_before_locking() {
    let spec = specs();

    let err = spec
        .gate
        .admit(&config(), WORKFLOW, &properties(&[]))
        .unwrap_err();

    assert!(matches!(
        err,
        AdmissionError::Scope(ScopeError::MissingProperty(_))
    ));
    assert_eq!(
        err.to_string(),
        "property strategy is not defined and property-based scoping is in force"
    );
}

#[test]
fn each_property_value_gets_an_independent_pool() {
    let spec = specs();
    let config = config();

    // The full acquire/exhaust/release cycle, repeated for five property
    // values with no cross-interference
    for strategy in 0..5 {
        let value = format!("myStrategy{strategy}");
        let props = properties(&[("strategy", value.as_str())]);

        let mut permits: Vec<(String, PermitId)> = Vec::new();
        for attempt in 0..MAX_ALLOWED {
            let admission = spec.gate.admit(&config, WORKFLOW, &props).unwrap();
            assert!(admission.result.is_acquired, "{value} attempt #{attempt}");
            permits.push((
                admission.scope_key,
                admission.result.acquired_permit_id.unwrap(),
            ));
        }

        for attempt in 0..MAX_ALLOWED {
            let denied = spec.gate.admit(&config, WORKFLOW, &props).unwrap();
            assert!(!denied.result.is_acquired, "{value} attempt #{attempt}");
        }

        for (scope, permit) in permits.drain(..NUM_REMOVE) {
            assert!(spec
                .gate
                .release(&config, &permit.to_string(), &scope)
                .unwrap());
        }

        for attempt in 0..NUM_REMOVE {
            let admission = spec.gate.admit(&config, WORKFLOW, &props).unwrap();
            assert!(admission.result.is_acquired, "{value} attempt #{attempt}");
        }

        let over = spec.gate.admit(&config, WORKFLOW, &props).unwrap();
        assert!(!over.result.is_acquired, "{value}");
    }
}

#[test]
fn extra_properties_do_not_change_the_scope() {
    let spec = specs();
    let config = config();

    let first = spec
        .gate
        .admit(
            &config,
            WORKFLOW,
            &properties(&[("strategy", "x"), ("unrelated", "y")]),
        )
        .unwrap();
    let second = spec
        .gate
        .admit(&config, WORKFLOW, &properties(&[("strategy", "x")]))
        .unwrap();

    // Same resolved value, same pool
    assert_eq!(first.scope_key, second.scope_key);
}
