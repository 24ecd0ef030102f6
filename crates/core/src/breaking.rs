//! Breaking-change detection between two versions of one agent.

use crate::contract::AgentContract;
use crate::error::{ResolveError, ResolveResult};
use crate::schema::{Direction, SchemaCache};
use ar_protocol::breaking_models::{BreakingChange, BreakingChangeType, BreakingChangesResult, Severity};
use ar_protocol::manifest_models::AgentManifest;
use serde_json::Value;

/// Compare two manifests of the same agent.
///
/// Published channels and commands are compared by name:
/// - a removed channel or command is a major change
/// - a channel payload schema that evolves incompatibly is major
/// - a command input schema that evolves incompatibly is major
/// - a command output schema is checked in the narrowing direction (the new
///   output must be readable by parsers of the old one) and is minor
///
/// A schema that fails to compile on either side is reported as a
/// `schema-incompatible` change with the severity of its dimension.
///
/// # Errors
///
/// Returns `ResolveError::AgentMismatch` when the manifests name different
/// agents. No comparison is attempted in that case.
pub fn detect_breaking_changes(
    old: &AgentManifest,
    new: &AgentManifest,
) -> ResolveResult<BreakingChangesResult> {
    if old.name() != new.name() {
        return Err(ResolveError::AgentMismatch {
            old: old.name().to_string(),
            new: new.name().to_string(),
        });
    }

    let old_contract = AgentContract::extract(old);
    let new_contract = AgentContract::extract(new);
    let mut detector = Detector {
        old_version: old.version(),
        new_version: new.version(),
        schemas: SchemaCache::new(),
        changes: Vec::new(),
    };

    for (channel, old_event) in &old_contract.publishes {
        let resource = format!("event:{channel}");
        let Some(new_event) = new_contract.publishes.get(channel) else {
            detector.push(
                BreakingChangeType::RemovedEvent,
                resource,
                format!("Published channel '{channel}' was removed"),
                Severity::Major,
            );
            continue;
        };
        if let (Some(old_schema), Some(new_schema)) = (&old_event.schema, &new_event.schema) {
            detector.evolve(
                old_schema,
                new_schema,
                BreakingChangeType::SchemaIncompatible,
                resource,
                &format!("Payload schema of channel '{channel}'"),
                Severity::Major,
            );
        }
    }

    for (name, old_command) in &old_contract.commands {
        let resource = format!("command:{name}");
        let Some(new_command) = new_contract.commands.get(name) else {
            detector.push(
                BreakingChangeType::RemovedCommand,
                resource,
                format!("Command '{name}' was removed"),
                Severity::Major,
            );
            continue;
        };

        detector.evolve(
            &old_command.input_schema,
            &new_command.input_schema,
            BreakingChangeType::SignatureChanged,
            resource.clone(),
            &format!("Input schema of command '{name}'"),
            Severity::Major,
        );

        if let (Some(old_output), Some(new_output)) = (&old_command.output_schema, &new_command.output_schema) {
            // Arguments swapped: the new output must be a subset of the old.
            detector.evolve(
                new_output,
                old_output,
                BreakingChangeType::SignatureChanged,
                resource,
                &format!("Output schema of command '{name}'"),
                Severity::Minor,
            );
        }
    }

    let result = BreakingChangesResult::from_changes(detector.changes);
    tracing::debug!(
        agent = old.name(),
        major = result.major_count,
        minor = result.minor_count,
        "breaking change detection finished"
    );
    Ok(result)
}

struct Detector<'a> {
    old_version: &'a str,
    new_version: &'a str,
    schemas: SchemaCache,
    changes: Vec<BreakingChange>,
}

impl Detector<'_> {
    fn push(&mut self, change_type: BreakingChangeType, resource: String, description: String, severity: Severity) {
        self.changes.push(BreakingChange {
            change_type,
            resource,
            old_version: self.old_version.to_string(),
            new_version: self.new_version.to_string(),
            description,
            severity,
        });
    }

    /// Record a change unless `from` evolves compatibly into `to`.
    fn evolve(
        &mut self,
        from: &Value,
        to: &Value,
        change_type: BreakingChangeType,
        resource: String,
        subject: &str,
        severity: Severity,
    ) {
        match self.schemas.check(from, to, Direction::Evolution) {
            Ok(result) if result.compatible => {}
            Ok(result) => {
                let reason = result.reason.unwrap_or_default();
                self.push(
                    change_type,
                    resource,
                    format!("{subject} changed incompatibly: {reason}"),
                    severity,
                );
            }
            Err(error) => self.push(
                BreakingChangeType::SchemaIncompatible,
                resource,
                format!("{subject} could not be compared: {error}"),
                severity,
            ),
        }
    }
}
