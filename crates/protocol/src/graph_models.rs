//! Dependency graph export models.
//!
//! The JSON form of a dependency graph visualisation:
//!
//! ```json
//! {
//!   "nodes": [{ "id": "api", "version": "1.0.0" }],
//!   "edges": [{ "from": "api", "to": "db", "version": "^2.0.0", "required": true }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An agent in the exported graph.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct GraphNode {
    pub id: String,
    pub version: String,
}

/// A declared dependency, pointing from consumer to dependency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,

    /// The range expression declared on the edge.
    pub version: String,

    pub required: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}
