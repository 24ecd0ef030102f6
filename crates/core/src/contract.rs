//! Normalized messaging contracts extracted from manifests.

use ar_protocol::manifest_models::{AgentManifest, CommandContract, EventContract, Subscription};
use std::collections::BTreeMap;

/// The contract an agent exposes, keyed by channel or command name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentContract {
    pub agent: String,
    pub version: String,
    pub publishes: BTreeMap<String, EventContract>,
    pub subscribes: BTreeMap<String, Subscription>,
    pub commands: BTreeMap<String, CommandContract>,
    /// False when the manifest has no `messaging` block at all.
    pub has_messaging: bool,
}

impl AgentContract {
    /// Project a manifest into its contract.
    ///
    /// A missing `messaging` block yields an empty contract. When a channel
    /// or command name repeats, the last declaration wins.
    pub fn extract(manifest: &AgentManifest) -> Self {
        let mut contract = Self {
            agent: manifest.name().to_string(),
            version: manifest.version().to_string(),
            ..Self::default()
        };

        let Some(messaging) = &manifest.spec.messaging else {
            return contract;
        };
        contract.has_messaging = true;

        for event in &messaging.publishes {
            contract.publishes.insert(event.channel.clone(), event.clone());
        }
        for subscription in &messaging.subscribes {
            contract
                .subscribes
                .insert(subscription.channel.clone(), subscription.clone());
        }
        for command in &messaging.commands {
            contract.commands.insert(command.name.clone(), command.clone());
        }

        contract
    }

    pub fn publishes_channel(&self, channel: &str) -> bool {
        self.publishes.contains_key(channel)
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }
}
