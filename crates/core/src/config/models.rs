//! Project model that aggregates everything loaded from disk.
//!
//! This module provides the `ProjectConfig` structure that combines the
//! resolver settings and every agent manifest of a project.

use ar_protocol::config_models::ResolverConfig;
use ar_protocol::manifest_models::AgentManifest;

/// A project loaded from the `.agent-deps/` directory.
///
/// This structure aggregates all configuration sources:
/// - `config.toml`: resolver settings
/// - `agents/*.{yaml,yml,json}`: agent manifests
///
/// # Example
///
/// ```rust,no_run
/// use ar_core::config::loader::load_project;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let project = load_project(Path::new(".")).await?;
/// println!("Loaded {} manifests", project.manifests.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    /// Resolver settings from `config.toml`.
    pub config: ResolverConfig,

    /// Agent manifests, sorted by file name.
    pub manifests: Vec<AgentManifest>,
}
