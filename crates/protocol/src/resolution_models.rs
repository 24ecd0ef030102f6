//! Dependency validation result models.
//!
//! Everything in this module is a derived, read-only output of a single
//! validation pass over a caller-supplied manifest set. Findings are data:
//! a failed pass is signalled by `ValidationResult::valid == false`, never
//! by an error.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One consumer's contribution to a version conflict.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct VersionRequirement {
    /// The agent declaring the dependency.
    pub required_by: String,

    /// The range expression it declared.
    pub version: String,
}

/// A dependency whose contributed ranges have no common version.
///
/// Also produced when any contributed range fails to parse.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct VersionConflict {
    /// Name of the agent depended upon.
    pub dependency: String,

    /// Every `(requiringAgent, range)` pair, in manifest order.
    pub requirements: Vec<VersionRequirement>,

    /// Why the ranges conflict.
    pub reason: String,
}

/// One detected dependency cycle, `[a, b, ..., a]`.
///
/// Cycles are a diagnostic list: the same cycle reached from a different
/// traversal start is not deduplicated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct CircularDependency {
    pub cycle: Vec<String>,
}

impl CircularDependency {
    /// Distinct agent names taking part in the cycle.
    pub fn agents(&self) -> &[String] {
        match self.cycle.split_last() {
            Some((_, rest)) if !rest.is_empty() => rest,
            _ => &self.cycle,
        }
    }
}

/// A required dependency whose target is absent from the manifest set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct MissingDependency {
    /// The consumer declaring the dependency.
    pub agent: String,

    /// The absent target.
    pub dependency: String,

    /// The range the consumer asked for.
    pub version: String,
}

/// An expectation a consumer holds that its provider does not honour.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct ContractViolation {
    /// The consumer.
    pub agent: String,

    /// The provider.
    pub dependency: String,

    /// Which expectation is unmet.
    pub violation: String,
}

/// A warning-level diagnostic. Warnings never affect validity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct ValidationWarning {
    pub agent: String,
    pub message: String,
}

/// Outcome of a full dependency validation pass.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True only when all four finding lists are empty.
    pub valid: bool,

    pub conflicts: Vec<VersionConflict>,

    pub circular_dependencies: Vec<CircularDependency>,

    pub missing_dependencies: Vec<MissingDependency>,

    pub contract_violations: Vec<ContractViolation>,

    #[serde(default)]
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Build a result, deriving `valid` from the findings.
    pub fn new(
        conflicts: Vec<VersionConflict>,
        circular_dependencies: Vec<CircularDependency>,
        missing_dependencies: Vec<MissingDependency>,
        contract_violations: Vec<ContractViolation>,
        warnings: Vec<ValidationWarning>,
    ) -> Self {
        let valid = conflicts.is_empty()
            && circular_dependencies.is_empty()
            && missing_dependencies.is_empty()
            && contract_violations.is_empty();
        Self {
            valid,
            conflicts,
            circular_dependencies,
            missing_dependencies,
            contract_violations,
            warnings,
        }
    }

    /// Total number of findings (warnings excluded).
    pub fn finding_count(&self) -> usize {
        self.conflicts.len()
            + self.circular_dependencies.len()
            + self.missing_dependencies.len()
            + self.contract_violations.len()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }
}
