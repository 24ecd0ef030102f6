//! Test fixtures for building manifests and sample projects.

use ar_protocol::manifest_models::{
    AgentDependency, AgentManifest, AgentSpec, CommandContract, ContractExpectation, Dependencies,
    EventContract, ManifestMetadata, Messaging, Subscription,
};
use serde_json::Value;
use std::collections::BTreeMap;
use tempfile::TempDir;

/// Fluent builder for an `AgentManifest`.
///
/// Every built manifest carries a (possibly empty) messaging block, so the
/// "no messaging" warning only appears when `without_messaging` is called.
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    manifest: AgentManifest,
}

#[allow(dead_code)]
impl ManifestBuilder {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            manifest: AgentManifest {
                api_version: "ossa/v0.3.3".to_string(),
                kind: "Agent".to_string(),
                metadata: ManifestMetadata {
                    name: name.to_string(),
                    version: version.to_string(),
                    description: None,
                    labels: BTreeMap::new(),
                },
                spec: AgentSpec {
                    role: None,
                    dependencies: None,
                    messaging: Some(Messaging::default()),
                },
            },
        }
    }

    fn push_dependency(mut self, dependency: AgentDependency) -> Self {
        self.manifest
            .spec
            .dependencies
            .get_or_insert_with(Dependencies::default)
            .agents
            .push(dependency);
        self
    }

    fn messaging(&mut self) -> &mut Messaging {
        self.manifest.spec.messaging.get_or_insert_with(Messaging::default)
    }

    /// Required dependency without a contract expectation.
    pub fn depends_on(self, name: &str, range: &str) -> Self {
        self.push_dependency(AgentDependency {
            name: name.to_string(),
            version: range.to_string(),
            required: true,
            contract: None,
        })
    }

    pub fn optionally_depends_on(self, name: &str, range: &str) -> Self {
        self.push_dependency(AgentDependency {
            name: name.to_string(),
            version: range.to_string(),
            required: false,
            contract: None,
        })
    }

    /// Required dependency expecting the given channels and commands.
    pub fn depends_with_contract(self, name: &str, range: &str, publishes: &[&str], commands: &[&str]) -> Self {
        self.push_dependency(AgentDependency {
            name: name.to_string(),
            version: range.to_string(),
            required: true,
            contract: Some(ContractExpectation {
                publishes: publishes.iter().map(|s| s.to_string()).collect(),
                commands: commands.iter().map(|s| s.to_string()).collect(),
            }),
        })
    }

    pub fn publishes(mut self, channel: &str, schema: Option<Value>) -> Self {
        self.messaging().publishes.push(EventContract {
            channel: channel.to_string(),
            description: None,
            schema,
            examples: Vec::new(),
        });
        self
    }

    pub fn subscribes(mut self, channel: &str, schema: Option<Value>) -> Self {
        self.messaging().subscribes.push(Subscription {
            channel: channel.to_string(),
            schema,
            handler: None,
        });
        self
    }

    pub fn command(mut self, name: &str, input_schema: Value, output_schema: Option<Value>) -> Self {
        self.messaging().commands.push(CommandContract {
            name: name.to_string(),
            description: None,
            input_schema,
            output_schema,
            timeout_seconds: None,
            idempotent: false,
            is_async: false,
        });
        self
    }

    pub fn without_messaging(mut self) -> Self {
        self.manifest.spec.messaging = None;
        self
    }

    pub fn build(self) -> AgentManifest {
        self.manifest
    }
}

/// Manifest with only required dependencies at `*`.
#[allow(dead_code)]
pub fn agent(name: &str, dependencies: &[&str]) -> AgentManifest {
    dependencies
        .iter()
        .fold(ManifestBuilder::new(name, "1.0.0"), |builder, dep| builder.depends_on(dep, "*"))
        .build()
}

/// Create a temporary project with a `.agent-deps/` directory holding the
/// given `(file name, contents)` manifests.
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project(manifests: &[(&str, &str)], config_toml: Option<&str>) -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let agents_dir = temp_dir.path().join(".agent-deps/agents");
    std::fs::create_dir_all(&agents_dir)?;

    if let Some(config) = config_toml {
        std::fs::write(temp_dir.path().join(".agent-deps/config.toml"), config)?;
    }
    for (file_name, contents) in manifests {
        std::fs::write(agents_dir.join(file_name), contents)?;
    }

    Ok(temp_dir)
}
