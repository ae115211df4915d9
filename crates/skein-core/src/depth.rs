//! Depth calculation: longest distance from any dependency-free root.
//!
//! # Algorithm
//!
//! Breadth-first wave from the roots along `dependents` edges. Every node
//! tracks how many of its dependencies still lack a final depth; it is
//! offered `depth + 1` by each finished dependency and keeps the **maximum**
//! offer (a node reachable from several roots sits below its deepest
//! dependency, not its nearest). A node enters the queue exactly once — when
//! its last dependency finishes — so the pass terminates even when the graph
//! still contains cycles.
//!
//! Nodes on or downstream of a cycle never see all dependencies finish; the
//! max offer accumulated so far stays as a best-effort lower bound. Callers
//! must consult cycle detection before trusting depths on a cyclic graph.

use std::collections::{BTreeMap, VecDeque};

use crate::node::DependencyGraph;

/// Recompute every node's `depth` in place and clear the staleness flag.
///
/// Idempotent; O(V + E).
pub fn compute_depths<M>(graph: &mut DependencyGraph<M>) {
    let mut pending: BTreeMap<&str, usize> = graph
        .nodes
        .values()
        .map(|n| (n.id.as_str(), n.dependencies.len()))
        .collect();

    // Offers received so far; roots start at zero by definition.
    let mut offers: BTreeMap<&str, usize> = graph.nodes.keys().map(|id| (id.as_str(), 0)).collect();

    let mut queue: VecDeque<&str> = graph
        .nodes
        .values()
        .filter(|n| n.is_root())
        .map(|n| n.id.as_str())
        .collect();

    while let Some(id) = queue.pop_front() {
        let depth = offers[id];
        let node = &graph.nodes[id];
        for dependent in &node.dependents {
            let offer = offers.get_mut(dependent.as_str()).map(|d| {
                *d = (*d).max(depth + 1);
                *d
            });
            // Last finished dependency releases the dependent into the queue.
            if let Some(remaining) = pending.get_mut(dependent.as_str()) {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 && offer.is_some() {
                    queue.push_back(dependent.as_str());
                }
            }
        }
    }

    let depths: BTreeMap<String, usize> = offers
        .into_iter()
        .map(|(id, d)| (id.to_string(), d))
        .collect();
    for (id, node) in &mut graph.nodes {
        node.depth = depths.get(id).copied().unwrap_or(0);
    }
    graph.depth_stale = false;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::DependencyGraph;

    fn graph_with_edges(edges: &[(&str, &str)], extra: &[&str]) -> DependencyGraph<()> {
        let mut graph = DependencyGraph::new();
        for &(from, to) in edges {
            graph.ensure_node(from);
            graph.ensure_node(to);
            graph.insert_edge(from, to);
        }
        for &id in extra {
            graph.ensure_node(id);
        }
        graph
    }

    fn depth(graph: &DependencyGraph<()>, id: &str) -> usize {
        graph.node(id).expect("node exists").depth
    }

    #[test]
    fn chain_depths_increase_from_root() {
        // c depends on b depends on a.
        let mut graph = graph_with_edges(&[("b", "a"), ("c", "b")], &[]);
        compute_depths(&mut graph);

        assert_eq!(depth(&graph, "a"), 0);
        assert_eq!(depth(&graph, "b"), 1);
        assert_eq!(depth(&graph, "c"), 2);
    }

    #[test]
    fn isolated_nodes_sit_at_zero() {
        let mut graph = graph_with_edges(&[], &["x", "y"]);
        compute_depths(&mut graph);
        assert_eq!(depth(&graph, "x"), 0);
        assert_eq!(depth(&graph, "y"), 0);
    }

    #[test]
    fn depth_is_maximum_over_all_dependencies() {
        // z depends on both a (depth 0) and c (depth 2 via b).
        let mut graph = graph_with_edges(&[("b", "a"), ("c", "b"), ("z", "a"), ("z", "c")], &[]);
        compute_depths(&mut graph);

        assert_eq!(depth(&graph, "z"), 3, "deepest dependency wins");
    }

    #[test]
    fn multiple_roots_longest_distance_wins() {
        // x depends on r1 directly and on r2 through m.
        let mut graph = graph_with_edges(&[("x", "r1"), ("m", "r2"), ("x", "m")], &[]);
        compute_depths(&mut graph);

        assert_eq!(depth(&graph, "r1"), 0);
        assert_eq!(depth(&graph, "r2"), 0);
        assert_eq!(depth(&graph, "m"), 1);
        assert_eq!(depth(&graph, "x"), 2);
    }

    #[test]
    fn terminates_on_pure_cycle() {
        let mut graph = graph_with_edges(&[("a", "b"), ("b", "a")], &[]);
        compute_depths(&mut graph);

        // No root reaches the cycle: depths stay at the zero lower bound.
        assert_eq!(depth(&graph, "a"), 0);
        assert_eq!(depth(&graph, "b"), 0);
    }

    #[test]
    fn terminates_on_self_loop() {
        let mut graph = graph_with_edges(&[("a", "a")], &["b"]);
        compute_depths(&mut graph);
        assert_eq!(depth(&graph, "a"), 0);
        assert_eq!(depth(&graph, "b"), 0);
    }

    #[test]
    fn cycle_downstream_keeps_best_effort_bound() {
        // r → feeds x, which also depends on the a/b cycle.
        let mut graph = graph_with_edges(&[("x", "r"), ("a", "b"), ("b", "a"), ("x", "a")], &[]);
        compute_depths(&mut graph);

        // x never sees its cyclic dependency finish; the offer from r remains.
        assert_eq!(depth(&graph, "x"), 1, "lower bound from the acyclic side");
    }

    #[test]
    fn recompute_is_idempotent_and_clears_staleness() {
        let mut graph = graph_with_edges(&[("b", "a")], &[]);
        compute_depths(&mut graph);
        let first: Vec<usize> = graph.nodes().values().map(|n| n.depth).collect();

        compute_depths(&mut graph);
        let second: Vec<usize> = graph.nodes().values().map(|n| n.depth).collect();

        assert_eq!(first, second);
        assert!(!graph.depths_stale());
    }
}
