//! Dependency graph construction and visualisation export.
//!
//! The graph is rebuilt from the manifest set on every call. It is kept in
//! two orientations:
//! - `forward`: consumer -> dependencies, including targets absent from the
//!   manifest set (used by cycle and missing-dependency detection)
//! - `reverse`: dependency -> consumers, restricted to known agents (used by
//!   deployment batching)

use crate::error::{ResolveError, ResolveResult};
use ar_protocol::graph_models::{GraphEdge, GraphExport, GraphNode};
use ar_protocol::manifest_models::AgentManifest;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::str::FromStr;

/// Adjacency lists keyed by agent name.
pub type Adjacency = BTreeMap<String, Vec<String>>;

/// A dependency graph in both orientations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    pub forward: Adjacency,
    pub reverse: Adjacency,
}

impl DependencyGraph {
    /// Build the graph from a manifest set.
    ///
    /// Every manifest name is a key in both orientations, even without edges.
    /// Duplicate edges (the same dependency declared twice) are collapsed.
    pub fn build(manifests: &[AgentManifest]) -> Self {
        let known: BTreeSet<&str> = manifests.iter().map(AgentManifest::name).collect();

        let mut forward = Adjacency::new();
        let mut reverse = Adjacency::new();
        for name in &known {
            forward.insert((*name).to_string(), Vec::new());
            reverse.insert((*name).to_string(), Vec::new());
        }

        for manifest in manifests {
            for dependency in manifest.dependencies() {
                push_unique(forward.entry(manifest.name().to_string()).or_default(), &dependency.name);
                if known.contains(dependency.name.as_str()) {
                    push_unique(
                        reverse.entry(dependency.name.clone()).or_default(),
                        manifest.name(),
                    );
                }
            }
        }

        Self { forward, reverse }
    }

    /// Names of every known agent, in sorted order.
    pub fn agents(&self) -> impl Iterator<Item = &str> {
        self.forward.keys().map(String::as_str)
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|existing| existing == name) {
        list.push(name.to_string());
    }
}

/// Output format for [`export_graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Dot,
    Json,
}

impl FromStr for GraphFormat {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dot" => Ok(Self::Dot),
            "json" => Ok(Self::Json),
            other => Err(ResolveError::UnknownGraphFormat(other.to_string())),
        }
    }
}

/// Build the JSON export record: one node per manifest, one edge per
/// declared dependency, in manifest order.
pub fn graph_export(manifests: &[AgentManifest]) -> GraphExport {
    let nodes = manifests
        .iter()
        .map(|manifest| GraphNode {
            id: manifest.name().to_string(),
            version: manifest.version().to_string(),
        })
        .collect();

    let edges = manifests
        .iter()
        .flat_map(|manifest| {
            manifest.dependencies().iter().map(move |dependency| GraphEdge {
                from: manifest.name().to_string(),
                to: dependency.name.clone(),
                version: dependency.version.clone(),
                required: dependency.required,
            })
        })
        .collect();

    GraphExport { nodes, edges }
}

/// Render the dependency graph in Graphviz DOT form.
///
/// Required dependencies are drawn solid, optional ones dashed; every edge is
/// labelled with its range expression.
pub fn to_dot(manifests: &[AgentManifest]) -> String {
    let mut dot = String::from("digraph AgentDependencies {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=box];\n");

    for manifest in manifests {
        let _ = writeln!(
            dot,
            "  \"{}\" [label=\"{}\\n{}\"];",
            escape(manifest.name()),
            escape(manifest.name()),
            escape(manifest.version())
        );
    }

    for manifest in manifests {
        for dependency in manifest.dependencies() {
            let style = if dependency.required { "solid" } else { "dashed" };
            let _ = writeln!(
                dot,
                "  \"{}\" -> \"{}\" [style={style}, label=\"{}\"];",
                escape(manifest.name()),
                escape(&dependency.name),
                escape(&dependency.version)
            );
        }
    }

    dot.push_str("}\n");
    dot
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render the dependency graph in the requested format.
///
/// # Errors
///
/// Returns `ResolveError::Serialize` if the JSON form cannot be produced.
pub fn export_graph(manifests: &[AgentManifest], format: GraphFormat) -> ResolveResult<String> {
    match format {
        GraphFormat::Dot => Ok(to_dot(manifests)),
        GraphFormat::Json => serde_json::to_string_pretty(&graph_export(manifests))
            .map_err(|e| ResolveError::Serialize(e.to_string())),
    }
}
