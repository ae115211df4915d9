//! Human-readable analysis report.
//!
//! Presentation only: formats the statistics, cycles, and a prefix of the
//! load order from a [`DependencyAnalysisResult`] for logs and terminals.
//! Carries no contract beyond being derived from that result.

use std::fmt::Write as _;

use crate::analyze::DependencyAnalysisResult;

/// Format an analysis result as a multi-line report, listing at most
/// `order_limit` load-order entries.
#[must_use]
pub fn format_report<M>(result: &DependencyAnalysisResult<M>, order_limit: usize) -> String {
    let stats = &result.statistics;
    let mut out = String::new();

    let _ = writeln!(out, "dependency analysis");
    let _ = writeln!(
        out,
        "  entities: {} ({} with dependencies, {} depended upon, {} isolated)",
        stats.node_count, stats.with_dependencies, stats.with_dependents, stats.isolated_count
    );
    let _ = writeln!(
        out,
        "  edges: {} (avg {:.2} per entity, max depth {})",
        stats.edge_count, stats.average_dependencies, stats.max_depth
    );

    if result.failures.is_empty() {
        let _ = writeln!(out, "  resolver failures: none");
    } else {
        let _ = writeln!(out, "  resolver failures: {}", result.failures.len());
        for failure in &result.failures {
            let _ = writeln!(out, "    - {failure}");
        }
    }

    if result.cycles.is_empty() {
        let _ = writeln!(out, "  cycles: none");
    } else {
        let _ = writeln!(out, "  cycles: {}", result.cycles.len());
        for cycle in &result.cycles {
            let _ = writeln!(out, "    - {cycle}");
        }
    }

    match &result.topological_order {
        Some(order) => {
            let shown = order.iter().take(order_limit).count();
            let _ = writeln!(
                out,
                "  load order ({shown} of {} shown):",
                order.len()
            );
            for (position, id) in order.iter().take(order_limit).enumerate() {
                let _ = writeln!(out, "    {:>3}. {id}", position + 1);
            }
        }
        None => {
            let _ = writeln!(out, "  load order: none (graph is cyclic)");
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
