//! Dependency cycle detection.

use crate::graph::Adjacency;
use ar_protocol::resolution_models::CircularDependency;
use std::collections::HashSet;

/// Find cycles in a consumer -> dependency graph.
///
/// Depth-first search from every not yet visited node, in key order. When an
/// edge reaches a node that is still on the current path, the path slice from
/// that node to the current node, closed by the node again, is reported.
/// Nodes fully explored from an earlier root are not revisited, and reported
/// cycles are not deduplicated. A self-loop is reported as `[a, a]`.
///
/// Edge targets that are not keys of `graph` are treated as leaves.
pub fn find_cycles(graph: &Adjacency) -> Vec<CircularDependency> {
    let mut cycles = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();

    for root in graph.keys() {
        if visited.contains(root.as_str()) {
            continue;
        }

        // Explicit stack of (node, index of next neighbour) so deep graphs
        // cannot overflow the call stack.
        let mut path: Vec<&str> = vec![root.as_str()];
        let mut on_path: HashSet<&str> = HashSet::from([root.as_str()]);
        let mut frames: Vec<(&str, usize)> = vec![(root.as_str(), 0)];
        visited.insert(root.as_str());

        while let Some((node, next)) = frames.last_mut() {
            let neighbours = graph.get(*node).map(Vec::as_slice).unwrap_or_default();
            let Some(neighbour) = neighbours.get(*next) else {
                on_path.remove(*node);
                path.pop();
                frames.pop();
                continue;
            };
            *next += 1;
            let neighbour = neighbour.as_str();

            if on_path.contains(neighbour) {
                let start = path
                    .iter()
                    .position(|name| *name == neighbour)
                    .unwrap_or_default();
                let mut cycle: Vec<String> = path[start..].iter().map(|name| name.to_string()).collect();
                cycle.push(neighbour.to_string());
                tracing::debug!(cycle = ?cycle, "dependency cycle found");
                cycles.push(CircularDependency { cycle });
            } else if visited.insert(neighbour) {
                path.push(neighbour);
                on_path.insert(neighbour);
                frames.push((neighbour, 0));
            }
        }
    }

    cycles
}
