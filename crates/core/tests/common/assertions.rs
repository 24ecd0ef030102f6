//! Custom assertion helpers for resolution results.

use ar_protocol::resolution_models::ValidationResult;
use std::collections::BTreeSet;

/// Assert that a result has exactly the expected number of findings per
/// category, printing the whole result on failure.
#[allow(dead_code)]
pub fn assert_findings(
    result: &ValidationResult,
    conflicts: usize,
    cycles: usize,
    missing: usize,
    violations: usize,
) {
    let actual = (
        result.conflicts.len(),
        result.circular_dependencies.len(),
        result.missing_dependencies.len(),
        result.contract_violations.len(),
    );
    assert_eq!(
        actual,
        (conflicts, cycles, missing, violations),
        "unexpected findings (conflicts, cycles, missing, violations): {result:#?}"
    );
}

/// Assert that some reported cycle involves exactly the given agents.
#[allow(dead_code)]
pub fn assert_has_cycle_through(result: &ValidationResult, agents: &[&str]) {
    let expected: BTreeSet<&str> = agents.iter().copied().collect();
    let found = result.circular_dependencies.iter().any(|cycle| {
        let members: BTreeSet<&str> = cycle.agents().iter().map(String::as_str).collect();
        members == expected
    });
    assert!(
        found,
        "no cycle through {agents:?} in {:?}",
        result.circular_dependencies
    );
}
