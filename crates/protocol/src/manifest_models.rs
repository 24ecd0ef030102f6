//! Agent manifest models for `.agent-deps/agents/*.yaml`.
//!
//! This module defines the in-memory shape of an OSSA agent manifest as far
//! as dependency resolution is concerned: identity, declared agent
//! dependencies, and the messaging contract (published channels, subscribed
//! channels and commands). Fields the resolver does not read are ignored
//! during deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use ts_rs::TS;

fn default_api_version() -> String {
    "ossa/v0.3.3".to_string()
}

fn default_kind() -> String {
    "Agent".to_string()
}

fn default_version() -> String {
    "0.0.0".to_string()
}

fn default_required() -> bool {
    true
}

/// A declarative agent manifest.
///
/// Manifests are immutable inputs to a resolution pass: the resolver only
/// reads them and never keeps them beyond a single call.
///
/// # Example
///
/// ```yaml
/// apiVersion: ossa/v0.3.3
/// kind: Agent
/// metadata:
///   name: order-service
///   version: 1.4.0
/// spec:
///   dependencies:
///     agents:
///       - name: inventory
///         version: ^2.1.0
///         contract:
///           commands: [reserve]
///   messaging:
///     publishes:
///       - channel: order.created
///         schema:
///           type: object
///           required: [id]
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct AgentManifest {
    /// Manifest format version, e.g. `ossa/v0.3.3`.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Manifest kind. Only `Agent` manifests carry dependencies.
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Identity of the agent.
    pub metadata: ManifestMetadata,

    /// Dependency and messaging declarations.
    #[serde(default)]
    pub spec: AgentSpec,
}

impl AgentManifest {
    /// Unique agent name within a resolution run.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Semantic version string of this agent.
    pub fn version(&self) -> &str {
        &self.metadata.version
    }

    /// Declared agent dependencies, in declaration order.
    pub fn dependencies(&self) -> &[AgentDependency] {
        self.spec
            .dependencies
            .as_ref()
            .map(|deps| deps.agents.as_slice())
            .unwrap_or_default()
    }
}

/// Identity block of a manifest.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct ManifestMetadata {
    /// Agent name, referenced by other agents' dependency declarations.
    pub name: String,

    /// Semantic version of the agent. Defaults to `0.0.0`.
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// The `spec` block of an agent manifest.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct AgentSpec {
    /// Free-text role of the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,

    /// Messaging contract. Optional: agents without messaging are valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging: Option<Messaging>,
}

/// Wrapper for `spec.dependencies`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct Dependencies {
    /// Agents this agent depends on.
    #[serde(default)]
    pub agents: Vec<AgentDependency>,
}

/// A dependency on another agent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct AgentDependency {
    /// Name of the target agent.
    pub name: String,

    /// Semver range expression, e.g. `^1.2.0`, `~1.2.0` or `1.2.3`.
    pub version: String,

    /// Whether absence of the target is an error. Defaults to `true`.
    #[serde(default = "default_required")]
    pub required: bool,

    /// What the consumer expects the target to expose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<ContractExpectation>,
}

/// Channel and command names a consumer expects from its dependency.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct ContractExpectation {
    #[serde(default)]
    pub publishes: Vec<String>,

    #[serde(default)]
    pub commands: Vec<String>,
}

/// The `spec.messaging` block.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct Messaging {
    #[serde(default)]
    pub publishes: Vec<EventContract>,

    #[serde(default)]
    pub subscribes: Vec<Subscription>,

    #[serde(default)]
    pub commands: Vec<CommandContract>,
}

/// A channel an agent publishes events on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct EventContract {
    /// Channel key, unique per publishing agent.
    pub channel: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON-Schema-like payload description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    /// Sample payloads, checked against `schema` for self-consistency.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Value>,
}

/// A channel an agent consumes events from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct Subscription {
    pub channel: String,

    /// The payload shape this subscriber expects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
}

/// A command an agent exposes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct CommandContract {
    /// Command name, unique per agent.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Schema of the command input.
    #[serde(default)]
    pub input_schema: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    #[serde(default)]
    pub idempotent: bool,

    #[serde(default, rename = "async")]
    pub is_async: bool,
}
