//! Aggregate statistics over a dependency graph.
//!
//! # Statistics Provided
//!
//! - **node_count / edge_count**: arena size and total dependency edges.
//! - **with_dependencies / with_dependents**: nodes with at least one edge
//!   out / in.
//! - **isolated_count**: nodes with no edges at all.
//! - **average_dependencies**: `edge_count / node_count`, 0.0 when empty.
//! - **max_depth**: deepest node as last computed by the depth pass — call
//!   `compute_depths` first if the graph was mutated.
//! - **cycle_count**: number of cycles the detector reports; delegates to
//!   [`crate::cycles::detect_cycles`], so it is zero exactly when a
//!   topological order exists.
//! - **max_dependencies / max_dependents**: largest single edge set in each
//!   direction.
//! - **density**: `edge_count / (node_count * (node_count - 1))`, 0.0 for
//!   graphs with fewer than two nodes.
//! - **weak_component_count / scc_count**: structural counts computed on a
//!   petgraph view of the arena (treating edges as undirected for the
//!   former, Tarjan for the latter).

use petgraph::algo::{connected_components, tarjan_scc};
use petgraph::graph::DiGraph;
use serde::Serialize;

use skein_core::DependencyGraph;

use crate::cycles::{CircularDependency, detect_cycles};

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary metrics for one dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of entities in the graph.
    pub node_count: usize,
    /// Total number of dependency edges.
    pub edge_count: usize,
    /// Entities with at least one dependency.
    pub with_dependencies: usize,
    /// Entities with at least one dependent.
    pub with_dependents: usize,
    /// Entities with no dependencies and no dependents.
    pub isolated_count: usize,
    /// Mean `dependencies` set size across all entities.
    pub average_dependencies: f64,
    /// Deepest entity (longest distance below a root).
    pub max_depth: usize,
    /// Number of detected cycles. Zero iff a load order exists.
    pub cycle_count: usize,
    /// Largest single `dependencies` set.
    pub max_dependencies: usize,
    /// Largest single `dependents` set.
    pub max_dependents: usize,
    /// Graph density in `[0.0, 1.0]`.
    pub density: f64,
    /// Weakly connected components (disjoint islands).
    pub weak_component_count: usize,
    /// Strongly connected components; equals `node_count` on a DAG.
    pub scc_count: usize,
}

impl GraphStats {
    /// Return `true` if the graph contains at least one dependency cycle.
    #[must_use]
    pub const fn has_cycles(&self) -> bool {
        self.cycle_count > 0
    }

    /// Return `true` if the graph has no dependency edges.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }
}

/// Compute statistics, running cycle detection internally.
#[must_use]
pub fn statistics<M>(graph: &DependencyGraph<M>) -> GraphStats {
    statistics_with_cycles(graph, &detect_cycles(graph))
}

/// Compute statistics against an already-detected cycle list, avoiding a
/// second DFS scan when the caller holds one (as `analyze` does).
#[must_use]
pub fn statistics_with_cycles<M>(
    graph: &DependencyGraph<M>,
    cycles: &[CircularDependency],
) -> GraphStats {
    let node_count = graph.len();
    let edge_count = graph.edge_count();

    let mut with_dependencies = 0_usize;
    let mut with_dependents = 0_usize;
    let mut isolated_count = 0_usize;
    let mut max_depth = 0_usize;
    let mut max_dependencies = 0_usize;
    let mut max_dependents = 0_usize;

    for node in graph.nodes().values() {
        if !node.is_root() {
            with_dependencies += 1;
        }
        if !node.is_leaf() {
            with_dependents += 1;
        }
        if node.is_isolated() {
            isolated_count += 1;
        }
        max_depth = max_depth.max(node.depth);
        max_dependencies = max_dependencies.max(node.dependencies.len());
        max_dependents = max_dependents.max(node.dependents.len());
    }

    let view = petgraph_view(graph);

    GraphStats {
        node_count,
        edge_count,
        with_dependencies,
        with_dependents,
        isolated_count,
        average_dependencies: compute_average(edge_count, node_count),
        max_depth,
        cycle_count: cycles.len(),
        max_dependencies,
        max_dependents,
        density: compute_density(node_count, edge_count),
        weak_component_count: connected_components(&view),
        scc_count: tarjan_scc(&view).len(),
    }
}

/// Materialize a petgraph view of the arena for the structural algorithms.
fn petgraph_view<M>(graph: &DependencyGraph<M>) -> DiGraph<&str, ()> {
    let mut view = DiGraph::new();
    let mut indices = std::collections::BTreeMap::new();

    for id in graph.nodes().keys() {
        indices.insert(id.as_str(), view.add_node(id.as_str()));
    }
    for node in graph.nodes().values() {
        for dep in &node.dependencies {
            if let (Some(&from), Some(&to)) =
                (indices.get(node.id.as_str()), indices.get(dep.as_str()))
            {
                view.add_edge(from, to, ());
            }
        }
    }

    view
}

// Cast precision suppressed at function scope; counts stay far below 2^52.
#[allow(clippy::cast_precision_loss)]
fn compute_average(edge_count: usize, node_count: usize) -> f64 {
    if node_count == 0 {
        return 0.0_f64;
    }
    edge_count as f64 / node_count as f64
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
