//! Breaking-change report models.
//!
//! Produced when two versions of the same agent's manifest are compared.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Kind of contract change between two manifest versions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "kebab-case")]
pub enum BreakingChangeType {
    /// A published channel is gone.
    RemovedEvent,

    /// A command is gone.
    RemovedCommand,

    /// A still-published channel's payload schema evolved incompatibly.
    SchemaIncompatible,

    /// A still-present command's input or output schema evolved incompatibly.
    SignatureChanged,
}

impl fmt::Display for BreakingChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::RemovedEvent => "removed-event",
            Self::RemovedCommand => "removed-command",
            Self::SchemaIncompatible => "schema-incompatible",
            Self::SignatureChanged => "signature-changed",
        };
        f.write_str(s)
    }
}

/// How disruptive a change is for existing consumers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Major,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minor => f.write_str("minor"),
            Self::Major => f.write_str("major"),
        }
    }
}

/// A single detected change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct BreakingChange {
    #[serde(rename = "type")]
    pub change_type: BreakingChangeType,

    /// Affected resource, e.g. `event:task.completed` or `command:start`.
    pub resource: String,

    pub old_version: String,

    pub new_version: String,

    pub description: String,

    pub severity: Severity,
}

/// Outcome of comparing two versions of one agent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct BreakingChangesResult {
    /// True iff at least one `major` change exists.
    pub has_breaking_changes: bool,

    pub changes: Vec<BreakingChange>,

    /// One-line human-readable count.
    pub summary: String,

    pub major_count: usize,

    pub minor_count: usize,
}

impl BreakingChangesResult {
    /// Build a result from detected changes, deriving the counts and summary.
    pub fn from_changes(changes: Vec<BreakingChange>) -> Self {
        let major_count = changes
            .iter()
            .filter(|change| change.severity == Severity::Major)
            .count();
        let minor_count = changes.len() - major_count;

        let summary = if changes.is_empty() {
            "No breaking changes".to_string()
        } else {
            let noun = if changes.len() == 1 { "change" } else { "changes" };
            format!(
                "{} breaking {noun} ({major_count} major, {minor_count} minor)",
                changes.len()
            )
        };

        Self {
            has_breaking_changes: major_count > 0,
            changes,
            summary,
            major_count,
            minor_count,
        }
    }
}
