//! Owning arena for dependency nodes.
//!
//! # Overview
//!
//! A [`DependencyGraph`] stores every node in a single map keyed by entity ID
//! and represents edges as ID sets on each node, never as references between
//! nodes. Dependency graphs are cyclic-capable, so a pointer representation
//! would create ownership cycles; the arena sidesteps that entirely and makes
//! equality and traversal trivial.
//!
//! # Edge Direction
//!
//! `A.dependencies` contains `B` when A depends on B (A cannot load before B).
//! Every edge is mirrored: `B.dependents` then contains `A`. The mirror is
//! maintained by [`DependencyGraph::insert_edge`] / [`remove_edge`] and audited
//! by [`crate::verify`].
//!
//! [`remove_edge`]: DependencyGraph::remove_edge
//!
//! # Determinism
//!
//! Both the arena and the edge sets are ordered (`BTreeMap` / `BTreeSet`), so
//! every traversal in the engine visits nodes in lexicographic ID order and
//! produces stable output without explicit sorting.

use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// DependencyNode
// ---------------------------------------------------------------------------

/// One entity in the dependency graph.
///
/// `M` is the caller's opaque metadata type. Nodes materialized on demand by
/// the incremental mutator (referenced before their registry entry is known)
/// carry `metadata: None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode<M> {
    /// Unique entity ID; stable for the node's lifetime.
    pub id: String,
    /// Opaque entity metadata. `None` for nodes created by edge mutation
    /// before any registry entry supplied one.
    pub metadata: Option<M>,
    /// IDs this node depends on (edges out).
    pub dependencies: BTreeSet<String>,
    /// IDs that depend on this node (edges in). Always the exact mirror of
    /// the `dependencies` sets elsewhere in the arena.
    pub dependents: BTreeSet<String>,
    /// Longest known distance from any dependency-free root. Zero for roots.
    ///
    /// Recomputed by [`crate::depth::compute_depths`]; see
    /// [`DependencyGraph::depths_stale`] for the staleness contract.
    pub depth: usize,
}

impl<M> DependencyNode<M> {
    /// Create a node with empty edge sets at depth zero.
    #[must_use]
    pub fn new(id: impl Into<String>, metadata: Option<M>) -> Self {
        Self {
            id: id.into(),
            metadata,
            dependencies: BTreeSet::new(),
            dependents: BTreeSet::new(),
            depth: 0,
        }
    }

    /// Return `true` if the node depends on nothing.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Return `true` if nothing depends on the node.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.dependents.is_empty()
    }

    /// Return `true` if the node has no edges at all.
    #[must_use]
    pub fn is_isolated(&self) -> bool {
        self.is_root() && self.is_leaf()
    }

    /// Total number of edges touching the node (in plus out).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.dependencies.len() + self.dependents.len()
    }
}

// ---------------------------------------------------------------------------
// DependencyGraph
// ---------------------------------------------------------------------------

/// The owning aggregate: every node of one dependency graph, keyed by ID.
///
/// Construct via [`crate::build::build`] for a full registry snapshot, or
/// start from [`DependencyGraph::new`] and grow it one edge at a time with
/// the incremental mutator in [`crate::mutate`].
///
/// Roots, leaves, and the edge count are derived on demand from the arena so
/// they can never go stale under mutation. Stored depths *can* go stale; the
/// mutator flips [`DependencyGraph::depths_stale`] and recomputation is the
/// caller's responsibility (mutation stays O(1)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph<M> {
    pub(crate) nodes: BTreeMap<String, DependencyNode<M>>,
    pub(crate) depth_stale: bool,
}

impl<M> Default for DependencyGraph<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> DependencyGraph<M> {
    /// Create an empty graph.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            depth_stale: false,
        }
    }

    /// Look up a node by ID.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&DependencyNode<M>> {
        self.nodes.get(id)
    }

    /// Return `true` if a node with this ID exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// The full node arena, in ID order.
    #[must_use]
    pub const fn nodes(&self) -> &BTreeMap<String, DependencyNode<M>> {
        &self.nodes
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of dependency edges (sum of all `dependencies` sizes).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.dependencies.len()).sum()
    }

    /// IDs of nodes with no dependencies, in ID order.
    #[must_use]
    pub fn roots(&self) -> Vec<&str> {
        self.nodes
            .values()
            .filter(|n| n.is_root())
            .map(|n| n.id.as_str())
            .collect()
    }

    /// IDs of nodes with no dependents, in ID order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&str> {
        self.nodes
            .values()
            .filter(|n| n.is_leaf())
            .map(|n| n.id.as_str())
            .collect()
    }

    /// Return `true` if stored depths no longer reflect the current edge set.
    ///
    /// Set by the incremental mutator; cleared by
    /// [`crate::depth::compute_depths`].
    #[must_use]
    pub const fn depths_stale(&self) -> bool {
        self.depth_stale
    }

    /// BLAKE3 hash of the sorted edge set, for caller-side cache invalidation.
    ///
    /// Changes exactly when the edge set changes; node metadata and depths do
    /// not participate.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for node in self.nodes.values() {
            for dep in &node.dependencies {
                hasher.update(node.id.as_bytes());
                hasher.update(b"\x00");
                hasher.update(dep.as_bytes());
                hasher.update(b"\x00");
            }
        }
        format!("blake3:{}", hasher.finalize())
    }

    /// Register an entity without touching edges.
    ///
    /// Creates the node if absent; on an existing node, supplied metadata
    /// fills an empty slot but never overwrites. Returns `true` if the node
    /// was created. Lets hosts surface isolated entities that nothing
    /// references yet.
    pub fn insert_entity(&mut self, id: &str, metadata: Option<M>) -> bool {
        if let Some(node) = self.nodes.get_mut(id) {
            if node.metadata.is_none() {
                node.metadata = metadata;
            }
            false
        } else {
            self.nodes
                .insert(id.to_string(), DependencyNode::new(id, metadata));
            true
        }
    }

    /// Get or create the node for `id`, without metadata.
    pub(crate) fn ensure_node(&mut self, id: &str) -> &mut DependencyNode<M> {
        self.nodes
            .entry(id.to_string())
            .or_insert_with(|| DependencyNode::new(id, None))
    }

    /// Insert the edge `from → to` into both sides of the mirror.
    ///
    /// Both nodes must already exist. Returns `true` if the edge was new.
    /// Self-edges (`from == to`) are legal and land in both sets of the one
    /// node.
    pub(crate) fn insert_edge(&mut self, from: &str, to: &str) -> bool {
        let inserted = self
            .nodes
            .get_mut(from)
            .is_some_and(|n| n.dependencies.insert(to.to_string()));
        if inserted {
            if let Some(target) = self.nodes.get_mut(to) {
                target.dependents.insert(from.to_string());
            }
        }
        inserted
    }

    /// Remove the edge `from → to` from both sides of the mirror.
    ///
    /// Returns `true` if the edge existed.
    pub(crate) fn remove_edge(&mut self, from: &str, to: &str) -> bool {
        let removed = self
            .nodes
            .get_mut(from)
            .is_some_and(|n| n.dependencies.remove(to));
        if removed {
            if let Some(target) = self.nodes.get_mut(to) {
                target.dependents.remove(from);
            }
        }
        removed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with_edges(edges: &[(&str, &str)]) -> DependencyGraph<()> {
        let mut graph = DependencyGraph::new();
        for &(from, to) in edges {
            graph.ensure_node(from);
            graph.ensure_node(to);
            graph.insert_edge(from, to);
        }
        graph
    }

    #[test]
    fn empty_graph_has_no_structure() {
        let graph: DependencyGraph<()> = DependencyGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.roots().is_empty());
        assert!(graph.leaves().is_empty());
    }

    #[test]
    fn edges_are_mirrored() {
        let graph = graph_with_edges(&[("b", "a")]);

        let b = graph.node("b").expect("b exists");
        let a = graph.node("a").expect("a exists");
        assert!(b.dependencies.contains("a"));
        assert!(a.dependents.contains("b"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn duplicate_edge_not_counted_twice() {
        let mut graph = graph_with_edges(&[("b", "a")]);
        assert!(!graph.insert_edge("b", "a"), "duplicate insert is a no-op");
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn roots_and_leaves_classified() {
        // c → b → a: a is depended on by b, etc.
        let graph = graph_with_edges(&[("b", "a"), ("c", "b")]);

        assert_eq!(graph.roots(), vec!["a"]);
        assert_eq!(graph.leaves(), vec!["c"]);
    }

    #[test]
    fn self_edge_lands_in_both_sets_of_one_node() {
        let graph = graph_with_edges(&[("a", "a")]);

        let a = graph.node("a").expect("a exists");
        assert!(a.dependencies.contains("a"));
        assert!(a.dependents.contains("a"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn remove_edge_clears_both_sides() {
        let mut graph = graph_with_edges(&[("b", "a")]);

        assert!(graph.remove_edge("b", "a"));
        assert!(!graph.remove_edge("b", "a"), "second remove is a no-op");

        let b = graph.node("b").expect("b exists");
        let a = graph.node("a").expect("a exists");
        assert!(b.dependencies.is_empty());
        assert!(a.dependents.is_empty());
    }

    #[test]
    fn content_hash_tracks_edges_only() {
        let mut graph = graph_with_edges(&[("b", "a")]);
        let before = graph.content_hash();
        assert!(before.starts_with("blake3:"));

        // Depth changes do not affect the hash.
        graph.ensure_node("b").depth = 7;
        assert_eq!(graph.content_hash(), before);

        graph.ensure_node("c");
        graph.insert_edge("c", "b");
        assert_ne!(graph.content_hash(), before, "hash changes with edges");
    }

    #[test]
    fn insert_entity_fills_but_never_overwrites_metadata() {
        let mut graph: DependencyGraph<u32> = DependencyGraph::new();
        assert!(graph.insert_entity("a", None));
        assert!(!graph.insert_entity("a", Some(1)), "node already existed");
        assert_eq!(graph.node("a").expect("a").metadata, Some(1));

        assert!(!graph.insert_entity("a", Some(2)));
        assert_eq!(
            graph.node("a").expect("a").metadata,
            Some(1),
            "existing metadata kept"
        );
    }

    #[test]
    fn isolated_node_is_root_and_leaf() {
        let mut graph: DependencyGraph<()> = DependencyGraph::new();
        graph.ensure_node("solo");

        let solo = graph.node("solo").expect("solo exists");
        assert!(solo.is_isolated());
        assert_eq!(graph.roots(), vec!["solo"]);
        assert_eq!(graph.leaves(), vec!["solo"]);
    }
}
