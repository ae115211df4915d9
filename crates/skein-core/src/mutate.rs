//! Incremental graph mutation: single-edge add/remove without a rebuild.
//!
//! # Contract
//!
//! Mutation keeps the bidirectional mirror intact and stays O(1) amortized:
//! no depth recomputation, no cycle scan. Operations that change the edge set
//! mark stored depths stale ([`DependencyGraph::depths_stale`]); recomputing
//! via [`crate::depth::compute_depths`] is the caller's decision, as is
//! re-running cycle detection after an add.
//!
//! Redundant mutations (adding an existing edge, removing a missing one) are
//! no-ops, never errors, so callers can replay discovery events without
//! bookkeeping.

use tracing::trace;

use crate::node::{DependencyGraph, DependencyNode};

impl<M> DependencyGraph<M> {
    /// Record that `from` depends on `to`.
    ///
    /// Nodes missing from the arena are created on demand without metadata.
    /// Returns `true` if the edge was new. Does not check for cycles — pair
    /// with `skein-analysis`'s `would_create_cycle` when that matters.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> bool {
        self.ensure_node(from);
        self.ensure_node(to);
        let inserted = self.insert_edge(from, to);
        if inserted {
            trace!(%from, %to, "dependency added");
            self.depth_stale = true;
        }
        inserted
    }

    /// Remove the edge `from → to` from both sides of the mirror.
    ///
    /// A no-op when either node or the edge does not exist. Nodes whose edge
    /// sets become empty stay in the arena — re-adding an edge to a
    /// previously-isolated node must stay cheap — until explicitly purged via
    /// [`DependencyGraph::remove_node`].
    pub fn remove_dependency(&mut self, from: &str, to: &str) -> bool {
        let removed = self.remove_edge(from, to);
        if removed {
            trace!(%from, %to, "dependency removed");
            self.depth_stale = true;
        }
        removed
    }

    /// Purge a node, stripping it from the edge sets of all its neighbors.
    ///
    /// Returns the removed node, or `None` if the ID was unknown.
    pub fn remove_node(&mut self, id: &str) -> Option<DependencyNode<M>> {
        let node = self.nodes.remove(id)?;
        for dep in &node.dependencies {
            if let Some(target) = self.nodes.get_mut(dep) {
                target.dependents.remove(id);
            }
        }
        for dependent in &node.dependents {
            if let Some(source) = self.nodes.get_mut(dependent) {
                source.dependencies.remove(id);
            }
        }
        trace!(%id, "node purged");
        self.depth_stale = true;
        Some(node)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
