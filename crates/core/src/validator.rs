//! Dependency validation across a manifest set.
//!
//! `DependencyValidator` runs four independent checks and never stops at the
//! first failing one:
//! 1. version conflicts between ranges requested for the same agent
//! 2. dependency cycles
//! 3. required dependencies absent from the manifest set
//! 4. contract violations (missing channels/commands, schema mismatches)
//!
//! Warning-level diagnostics are collected alongside and do not affect
//! validity.

use crate::constraints::{self, VersionRange};
use crate::contract::AgentContract;
use crate::cycles::find_cycles;
use crate::graph::DependencyGraph;
use crate::schema::{is_compatible, Direction, SchemaCache};
use ar_protocol::config_models::ResolverConfig;
use ar_protocol::manifest_models::{AgentDependency, AgentManifest};
use ar_protocol::resolution_models::{
    ContractViolation, MissingDependency, ValidationResult, ValidationWarning, VersionConflict,
    VersionRequirement,
};
use std::collections::{BTreeMap, BTreeSet};

/// Stateless validator; one instance can validate any number of manifest
/// sets.
#[derive(Debug, Clone, Default)]
pub struct DependencyValidator {
    config: ResolverConfig,
}

impl DependencyValidator {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Run every check over `manifests`.
    pub fn validate(&self, manifests: &[AgentManifest]) -> ValidationResult {
        let mut warnings = Vec::new();
        let mut schemas = SchemaCache::new();

        let contracts = extract_contracts(manifests, &mut warnings);

        let conflicts = detect_conflicts(manifests);
        tracing::debug!(count = conflicts.len(), "version conflict check finished");

        let graph = DependencyGraph::build(manifests);
        let circular_dependencies = find_cycles(&graph.forward);
        tracing::debug!(count = circular_dependencies.len(), "cycle check finished");

        let missing_dependencies = detect_missing(manifests, &contracts);
        tracing::debug!(count = missing_dependencies.len(), "missing dependency check finished");

        let contract_violations = self.detect_contract_violations(manifests, &contracts, &mut schemas);
        tracing::debug!(count = contract_violations.len(), "contract check finished");

        if self.config.validate_examples {
            check_examples(&contracts, &mut schemas, &mut warnings);
        }
        if self.config.check_installed_versions {
            check_installed_versions(manifests, &contracts, &mut warnings);
        }

        ValidationResult::new(
            conflicts,
            circular_dependencies,
            missing_dependencies,
            contract_violations,
            warnings,
        )
    }

    /// Only the version conflict check, skipping graph and schema work.
    pub fn check_conflicts_only(&self, manifests: &[AgentManifest]) -> Vec<VersionConflict> {
        detect_conflicts(manifests)
    }

    fn detect_contract_violations(
        &self,
        manifests: &[AgentManifest],
        contracts: &BTreeMap<&str, AgentContract>,
        schemas: &mut SchemaCache,
    ) -> Vec<ContractViolation> {
        let mut violations = Vec::new();

        for manifest in manifests {
            let Some(consumer) = contracts.get(manifest.name()) else {
                continue;
            };
            for dependency in manifest.dependencies() {
                let Some(provider) = contracts.get(dependency.name.as_str()) else {
                    continue;
                };

                if let Some(expectation) = &dependency.contract {
                    for channel in &expectation.publishes {
                        if !provider.publishes_channel(channel) {
                            violations.push(violation(
                                manifest,
                                dependency,
                                format!("expected published channel '{channel}' is not published"),
                            ));
                        }
                    }
                    for command in &expectation.commands {
                        if !provider.has_command(command) {
                            violations.push(violation(
                                manifest,
                                dependency,
                                format!("expected command '{command}' is not exposed"),
                            ));
                        }
                    }
                }

                if dependency.contract.is_some() || self.config.check_all_subscriptions {
                    check_subscription_schemas(manifest, dependency, consumer, provider, schemas, &mut violations);
                }
            }
        }

        violations
    }
}

fn violation(manifest: &AgentManifest, dependency: &AgentDependency, text: String) -> ContractViolation {
    ContractViolation {
        agent: manifest.name().to_string(),
        dependency: dependency.name.clone(),
        violation: text,
    }
}

fn warn(warnings: &mut Vec<ValidationWarning>, agent: &str, message: String) {
    tracing::warn!(agent, "{message}");
    warnings.push(ValidationWarning {
        agent: agent.to_string(),
        message,
    });
}

/// Build one contract per agent name; a repeated name keeps the later
/// manifest's contract.
fn extract_contracts<'a>(
    manifests: &'a [AgentManifest],
    warnings: &mut Vec<ValidationWarning>,
) -> BTreeMap<&'a str, AgentContract> {
    let mut contracts = BTreeMap::new();
    for manifest in manifests {
        let contract = AgentContract::extract(manifest);
        if !contract.has_messaging {
            warn(
                warnings,
                manifest.name(),
                "agent declares no messaging block; its contract is empty".to_string(),
            );
        }
        if contracts.insert(manifest.name(), contract).is_some() {
            warn(
                warnings,
                manifest.name(),
                "agent name appears in more than one manifest; the last one is used for contract checks".to_string(),
            );
        }
    }
    contracts
}

/// Group every dependency by target and intersect the requested ranges.
pub fn detect_conflicts(manifests: &[AgentManifest]) -> Vec<VersionConflict> {
    let mut groups: BTreeMap<&str, Vec<VersionRequirement>> = BTreeMap::new();
    for manifest in manifests {
        for dependency in manifest.dependencies() {
            groups
                .entry(dependency.name.as_str())
                .or_default()
                .push(VersionRequirement {
                    required_by: manifest.name().to_string(),
                    version: dependency.version.clone(),
                });
        }
    }
    tracing::debug!(groups = groups.len(), "grouped dependencies by target");

    groups
        .into_iter()
        .filter_map(|(dependency, requirements)| {
            let ranges: Vec<&str> = requirements.iter().map(|r| r.version.as_str()).collect();
            let reason = match constraints::intersect_all(&ranges) {
                Err(error) => error.to_string(),
                Ok(range) if range.is_empty() => {
                    let listed: Vec<String> = requirements
                        .iter()
                        .map(|r| format!("{} (from {})", r.version, r.required_by))
                        .collect();
                    format!("no version satisfies all of: {}", listed.join(", "))
                }
                Ok(_) => return None,
            };
            Some(VersionConflict {
                dependency: dependency.to_string(),
                requirements,
                reason,
            })
        })
        .collect()
}

fn detect_missing(
    manifests: &[AgentManifest],
    contracts: &BTreeMap<&str, AgentContract>,
) -> Vec<MissingDependency> {
    let mut missing = Vec::new();
    for manifest in manifests {
        for dependency in manifest.dependencies() {
            if contracts.contains_key(dependency.name.as_str()) {
                continue;
            }
            if dependency.required {
                missing.push(MissingDependency {
                    agent: manifest.name().to_string(),
                    dependency: dependency.name.clone(),
                    version: dependency.version.clone(),
                });
            } else {
                tracing::debug!(
                    agent = manifest.name(),
                    dependency = %dependency.name,
                    "optional dependency not present"
                );
            }
        }
    }
    missing
}

/// Compare the consumer's subscription schema with the provider's publish
/// schema for every channel both sides declare.
fn check_subscription_schemas(
    manifest: &AgentManifest,
    dependency: &AgentDependency,
    consumer: &AgentContract,
    provider: &AgentContract,
    schemas: &mut SchemaCache,
    violations: &mut Vec<ContractViolation>,
) {
    for (channel, subscription) in &consumer.subscribes {
        let Some(published) = provider.publishes.get(channel) else {
            continue;
        };
        let (Some(expected), Some(offered)) = (&subscription.schema, &published.schema) else {
            continue;
        };

        let expected = match schemas.compile(expected) {
            Ok(compiled) => compiled,
            Err(error) => {
                violations.push(violation(
                    manifest,
                    dependency,
                    format!("schema mismatch on channel '{channel}': invalid subscriber schema: {error}"),
                ));
                continue;
            }
        };
        let offered = match schemas.compile(offered) {
            Ok(compiled) => compiled,
            Err(error) => {
                violations.push(violation(
                    manifest,
                    dependency,
                    format!("schema mismatch on channel '{channel}': invalid publisher schema: {error}"),
                ));
                continue;
            }
        };

        let result = is_compatible(expected.node(), offered.node(), Direction::ContractSatisfaction);
        if !result.compatible {
            let reason = result.reason.unwrap_or_default();
            violations.push(violation(
                manifest,
                dependency,
                format!("schema mismatch on channel '{channel}': {reason}"),
            ));
        }
    }
}

fn check_examples(
    contracts: &BTreeMap<&str, AgentContract>,
    schemas: &mut SchemaCache,
    warnings: &mut Vec<ValidationWarning>,
) {
    for contract in contracts.values() {
        for (channel, event) in &contract.publishes {
            let Some(schema) = &event.schema else {
                continue;
            };
            let compiled = match schemas.compile(schema) {
                Ok(compiled) => compiled,
                Err(error) => {
                    warn(
                        warnings,
                        &contract.agent,
                        format!("channel '{channel}' has an invalid schema: {error}"),
                    );
                    continue;
                }
            };
            for (index, example) in event.examples.iter().enumerate() {
                if let Some(first) = compiled.instance_errors(example).into_iter().next() {
                    warn(
                        warnings,
                        &contract.agent,
                        format!("example #{} for channel '{channel}' does not match its schema: {first}", index + 1),
                    );
                }
            }
        }
    }
}

fn check_installed_versions(
    manifests: &[AgentManifest],
    contracts: &BTreeMap<&str, AgentContract>,
    warnings: &mut Vec<ValidationWarning>,
) {
    let mut reported: BTreeSet<(&str, &str, &str)> = BTreeSet::new();
    for manifest in manifests {
        for dependency in manifest.dependencies() {
            let Some(target) = contracts.get(dependency.name.as_str()) else {
                continue;
            };
            // Unparseable ranges are already reported as conflicts.
            if VersionRange::parse(&dependency.version).is_err() {
                continue;
            }
            if constraints::satisfies(&target.version, &dependency.version) {
                continue;
            }
            if reported.insert((manifest.name(), dependency.name.as_str(), dependency.version.as_str())) {
                warn(
                    warnings,
                    manifest.name(),
                    format!(
                        "requires {}@{} but {} is at version {}",
                        dependency.name, dependency.version, dependency.name, target.version
                    ),
                );
            }
        }
    }
}
