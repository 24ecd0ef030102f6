//! Deployment batching with Kahn's algorithm.

use crate::error::{ResolveError, ResolveResult};
use crate::graph::DependencyGraph;
use ar_protocol::manifest_models::AgentManifest;
use std::collections::{BTreeMap, BTreeSet};

/// An ordered sequence of batches; each batch can be deployed in parallel
/// once every earlier batch has completed.
pub type DeploymentBatches = Vec<BTreeSet<String>>;

/// Group agents into deployment batches.
///
/// An agent's in-degree is the number of distinct known agents it depends
/// on. Each round collects every agent whose in-degree has reached zero into
/// one batch and releases its consumers. Dependencies on agents outside the
/// manifest set do not hold an agent back.
///
/// # Errors
///
/// Returns `ResolveError::CycleDetected` when some agents can never be
/// released, rather than a truncated batch list.
pub fn compute_batches(manifests: &[AgentManifest]) -> ResolveResult<DeploymentBatches> {
    let graph = DependencyGraph::build(manifests);

    let mut in_degree: BTreeMap<&str, usize> = graph.agents().map(|name| (name, 0)).collect();
    for consumers in graph.reverse.values() {
        for consumer in consumers {
            if let Some(degree) = in_degree.get_mut(consumer.as_str()) {
                *degree += 1;
            }
        }
    }

    let mut batches = DeploymentBatches::new();
    while !in_degree.is_empty() {
        let ready: BTreeSet<String> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| (*name).to_string())
            .collect();

        if ready.is_empty() {
            let agents: Vec<String> = in_degree.keys().map(|name| (*name).to_string()).collect();
            tracing::debug!(remaining = agents.len(), "deployment batching blocked by a cycle");
            return Err(ResolveError::CycleDetected { agents });
        }

        for name in &ready {
            in_degree.remove(name.as_str());
            for consumer in graph.reverse.get(name).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(consumer.as_str()) {
                    *degree = degree.saturating_sub(1);
                }
            }
        }

        tracing::debug!(batch = batches.len(), size = ready.len(), "deployment batch formed");
        batches.push(ready);
    }

    Ok(batches)
}
