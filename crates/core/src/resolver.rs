//! The resolver API surface.
//!
//! `Resolver` is a stateless value-in/value-out component: every call takes a
//! manifest set owned by the caller, recomputes whatever it needs, and keeps
//! nothing afterwards.

use crate::batching::{compute_batches, DeploymentBatches};
use crate::breaking::detect_breaking_changes;
use crate::error::ResolveResult;
use crate::graph::{export_graph, GraphFormat};
use crate::validator::DependencyValidator;
use ar_protocol::breaking_models::BreakingChangesResult;
use ar_protocol::config_models::ResolverConfig;
use ar_protocol::manifest_models::AgentManifest;
use ar_protocol::resolution_models::{ValidationResult, VersionConflict};

/// Entry point for dependency resolution over a manifest set.
///
/// # Example
///
/// ```rust,no_run
/// use ar_core::config::loader::load_project;
/// use ar_core::resolver::Resolver;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let project = load_project(Path::new(".")).await?;
/// let resolver = Resolver::new(project.config);
/// let result = resolver.validate_dependencies(&project.manifests);
/// println!("valid: {}", result.valid);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    validator: DependencyValidator,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            validator: DependencyValidator::new(config),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        self.validator.config()
    }

    /// Run conflict, cycle, missing-dependency and contract checks.
    pub fn validate_dependencies(&self, manifests: &[AgentManifest]) -> ValidationResult {
        tracing::debug!(manifests = manifests.len(), "validating dependencies");
        self.validator.validate(manifests)
    }

    /// Version conflict detection alone.
    pub fn check_conflicts_only(&self, manifests: &[AgentManifest]) -> Vec<VersionConflict> {
        self.validator.check_conflicts_only(manifests)
    }

    /// Render the dependency graph as DOT or JSON.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Serialize` if JSON rendering fails.
    pub fn generate_dependency_graph(
        &self,
        manifests: &[AgentManifest],
        format: GraphFormat,
    ) -> ResolveResult<String> {
        export_graph(manifests, format)
    }

    /// Group agents into ordered, parallel-deployable batches.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::CycleDetected` if the dependency graph has a
    /// cycle. An empty batch list only ever means an empty manifest set.
    pub fn calculate_deployment_order(&self, manifests: &[AgentManifest]) -> ResolveResult<DeploymentBatches> {
        compute_batches(manifests)
    }

    /// Compare two versions of the same agent.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::AgentMismatch` if the manifests name different
    /// agents.
    pub fn detect_breaking_changes(
        &self,
        old: &AgentManifest,
        new: &AgentManifest,
    ) -> ResolveResult<BreakingChangesResult> {
        detect_breaking_changes(old, new)
    }
}
