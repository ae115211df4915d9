//! Neutral node/edge export for visualization front ends.
//!
//! The engine renders nothing itself; it maps the graph into flat,
//! serde-serializable records a front end can draw. Roles distinguish roots,
//! leaves, isolated nodes, and everything in between; cycle participation is
//! flagged on both nodes and edges so consumers can paint loops distinctly.
//! The `size` field is a rendering hint proportional to total degree, not a
//! structural property.

use std::collections::BTreeSet;

use serde::Serialize;

use skein_core::DependencyGraph;

use crate::cycles::{CircularDependency, detect_cycles};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Structural role of a node, for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// No dependencies and no dependents.
    Isolated,
    /// No dependencies (loadable immediately).
    Root,
    /// No dependents (nothing builds on it).
    Leaf,
    /// Both edges in and edges out.
    Intermediate,
}

/// One renderable node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualizationNode {
    /// Entity ID (stable key for the front end).
    pub id: String,
    /// Structural role.
    pub role: NodeRole,
    /// Depth below the roots, for layered layouts.
    pub depth: usize,
    /// Rendering size hint: `|dependencies| + |dependents|`.
    pub size: usize,
    /// `true` when the node sits on at least one detected cycle.
    pub in_cycle: bool,
}

/// One renderable directed edge (`from` depends on `to`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualizationEdge {
    /// Depending entity.
    pub from: String,
    /// Depended-upon entity.
    pub to: String,
    /// `true` when the edge lies on a detected cycle path.
    pub in_cycle: bool,
}

/// The full export: every node and every edge, in deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualizationData {
    /// All nodes, in ID order.
    pub nodes: Vec<VisualizationNode>,
    /// All edges, ordered by source then target.
    pub edges: Vec<VisualizationEdge>,
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Export the graph, running cycle detection internally.
#[must_use]
pub fn export<M>(graph: &DependencyGraph<M>) -> VisualizationData {
    export_with_cycles(graph, &detect_cycles(graph))
}

/// Export against an already-detected cycle list.
#[must_use]
pub fn export_with_cycles<M>(
    graph: &DependencyGraph<M>,
    cycles: &[CircularDependency],
) -> VisualizationData {
    let cyclic_nodes: BTreeSet<&str> = cycles
        .iter()
        .flat_map(|c| c.affected.iter().map(String::as_str))
        .collect();

    // Consecutive pairs on any reported cycle path are the cyclic edges.
    let cyclic_edges: BTreeSet<(&str, &str)> = cycles
        .iter()
        .flat_map(|c| c.cycle.windows(2))
        .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        .collect();

    let mut nodes = Vec::with_capacity(graph.len());
    let mut edges = Vec::with_capacity(graph.edge_count());

    for node in graph.nodes().values() {
        let role = if node.is_isolated() {
            NodeRole::Isolated
        } else if node.is_root() {
            NodeRole::Root
        } else if node.is_leaf() {
            NodeRole::Leaf
        } else {
            NodeRole::Intermediate
        };

        nodes.push(VisualizationNode {
            id: node.id.clone(),
            role,
            depth: node.depth,
            size: node.degree(),
            in_cycle: cyclic_nodes.contains(node.id.as_str()),
        });

        for dep in &node.dependencies {
            edges.push(VisualizationEdge {
                from: node.id.clone(),
                to: dep.clone(),
                in_cycle: cyclic_edges.contains(&(node.id.as_str(), dep.as_str())),
            });
        }
    }

    VisualizationData { nodes, edges }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
