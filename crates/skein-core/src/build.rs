//! Graph construction from a registry snapshot.
//!
//! # Overview
//!
//! [`build`] turns an immutable registry snapshot (entity ID → metadata) and
//! a [`DependencyResolver`] into a fully-mirrored [`DependencyGraph`]:
//!
//! 1. One node per registry entry, edge sets empty.
//! 2. Resolver invoked per entity; failures are recovered locally (that
//!    entity becomes dependency-free) and reported in the outcome.
//! 3. Resolved IDs absent from the registry are dropped, not errors —
//!    partial registries are an expected transient state during incremental
//!    loading.
//! 4. Each surviving edge is mirrored into the target's `dependents` set.
//! 5. Depths are computed once all edges are in place.
//!
//! The build is total over a well-formed registry: no resolver misbehavior
//! and no cycle in the input can make it fail.

#![allow(clippy::module_name_repetitions)]

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, instrument, warn};

use crate::depth::compute_depths;
use crate::node::{DependencyGraph, DependencyNode};
use crate::resolver::DependencyResolver;

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Non-fatal diagnostic: the resolver failed for one entity.
///
/// The entity is still present in the graph with an empty dependency set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverFailure {
    /// ID of the entity whose metadata could not be resolved.
    pub entity_id: String,
    /// Human-readable failure description from the resolver.
    pub message: String,
}

impl fmt::Display for ResolverFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "resolver failed for '{}': {}",
            self.entity_id, self.message
        )
    }
}

/// Result of a full graph build: the graph plus per-entity diagnostics.
///
/// A cyclic or partially-resolvable registry is *not* an error — degraded
/// outcomes are data, and callers decide how to react.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome<M> {
    /// The built graph, mirrored and with depths computed.
    pub graph: DependencyGraph<M>,
    /// One entry per entity whose resolver invocation failed.
    pub failures: Vec<ResolverFailure>,
}

impl<M> BuildOutcome<M> {
    /// Return `true` if at least one entity resolved with a failure.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

/// Build a [`DependencyGraph`] from a registry snapshot and a resolver.
///
/// Consumes the snapshot; metadata moves into the nodes. The previous graph,
/// if any, is simply dropped by the caller — a build never mutates an
/// existing graph in place.
#[instrument(skip_all, fields(entities = registry.len()))]
pub fn build<M, R>(registry: BTreeMap<String, M>, resolver: &R) -> BuildOutcome<M>
where
    R: DependencyResolver<M>,
{
    let mut graph = DependencyGraph::new();
    for (id, metadata) in registry {
        let node = DependencyNode::new(id.clone(), Some(metadata));
        graph.nodes.insert(id, node);
    }

    let ids: Vec<String> = graph.nodes.keys().cloned().collect();
    let mut failures = Vec::new();

    for id in &ids {
        let resolved = match graph.nodes[id].metadata.as_ref() {
            Some(metadata) => match resolver.resolve(metadata) {
                Ok(deps) => deps,
                Err(err) => {
                    warn!(entity = %id, error = %err, "resolver failed; treating as dependency-free");
                    failures.push(ResolverFailure {
                        entity_id: id.clone(),
                        message: format!("{err:#}"),
                    });
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        for dep in resolved {
            if graph.contains(&dep) {
                graph.insert_edge(id, &dep);
            } else {
                debug!(entity = %id, reference = %dep, "dropping unknown reference");
            }
        }
    }

    compute_depths(&mut graph);

    debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        failures = failures.len(),
        "graph built"
    );

    BuildOutcome { graph, failures }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
