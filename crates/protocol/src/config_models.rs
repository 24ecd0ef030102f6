//! Resolver configuration models for `.agent-deps/config.toml`.
//!
//! This module defines the settings that tune which optional checks a
//! validation pass performs. None of them can turn a finding into a pass.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

fn default_true() -> bool {
    true
}

/// Represents resolver settings from `.agent-deps/config.toml`.
///
/// # Example
///
/// ```toml
/// # .agent-deps/config.toml
/// check-all-subscriptions = true
/// validate-examples = false
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct ResolverConfig {
    /// Compare subscription and publish schemas for every declared
    /// dependency, not only those carrying an explicit `contract`.
    #[serde(default)]
    pub check_all_subscriptions: bool,

    /// Check published `examples` against their channel schema.
    #[serde(default = "default_true")]
    pub validate_examples: bool,

    /// Warn when a present target agent's version is outside the range a
    /// consumer asked for.
    #[serde(default = "default_true")]
    pub check_installed_versions: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            check_all_subscriptions: false,
            validate_examples: true,
            check_installed_versions: true,
        }
    }
}
