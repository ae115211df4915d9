//! One-call analysis: build a graph from a registry snapshot and run every
//! pass over it.
//!
//! [`analyze`] is the snapshot path: callers hand over a registry and a
//! resolver, and get back the graph plus cycles, load order, and statistics
//! in one result. Hosts maintaining a live graph through the incremental
//! mutator instead call the individual passes on whatever graph is current.
//!
//! The engine performs no invalidation of its own — re-run `analyze`
//! whenever the underlying registry changes, and treat each result as a
//! snapshot, not a live view.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use skein_core::{BuildOutcome, DependencyGraph, DependencyResolver, ResolverFailure, build};

use crate::cycles::{CircularDependency, detect_cycles};
use crate::order::topological_order;
use crate::stats::{GraphStats, statistics_with_cycles};

/// Everything one analysis pass produces.
#[derive(Debug, Clone)]
pub struct DependencyAnalysisResult<M> {
    /// The built graph, mirrored and depth-annotated.
    pub graph: DependencyGraph<M>,
    /// Every cycle the detector found, in deterministic order.
    pub cycles: Vec<CircularDependency>,
    /// Loadable-first order, or `None` when `cycles` is non-empty.
    pub topological_order: Option<Vec<String>>,
    /// Aggregate metrics over the graph.
    pub statistics: GraphStats,
    /// Per-entity resolver failures recovered during the build.
    pub failures: Vec<ResolverFailure>,
}

impl<M> DependencyAnalysisResult<M> {
    /// Return `true` if the graph admits a load order and every entity
    /// resolved cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.topological_order.is_some() && self.failures.is_empty()
    }
}

/// Build and analyze a registry snapshot in one pass.
///
/// Total over well-formed registries: resolver failures and cycles degrade
/// the result, never abort it.
#[instrument(skip_all, fields(entities = registry.len()))]
pub fn analyze<M, R>(registry: BTreeMap<String, M>, resolver: &R) -> DependencyAnalysisResult<M>
where
    R: DependencyResolver<M>,
{
    let BuildOutcome { graph, failures } = build(registry, resolver);

    let cycles = detect_cycles(&graph);
    let topological_order = topological_order(&graph);
    let statistics = statistics_with_cycles(&graph, &cycles);

    debug!(
        nodes = statistics.node_count,
        edges = statistics.edge_count,
        cycles = cycles.len(),
        ordered = topological_order.is_some(),
        "analysis complete"
    );

    DependencyAnalysisResult {
        graph,
        cycles,
        topological_order,
        statistics,
        failures,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
