//! Root-to-target dependency chain tracing.
//!
//! # Overview
//!
//! [`dependency_chains`] enumerates **every** path from a dependency-free
//! root down to the target: DFS from the target backward through
//! `dependencies`, recording a path whenever a node with no further
//! dependencies is reached.
//!
//! The revisit guard is **per path**, not shared across the whole traversal.
//! A node consumed by one chain stays eligible for a different chain through
//! another branch; a single shared visited set would silently drop legitimate
//! alternates. The path-local guard still terminates on residual cycles — a
//! branch that loops back onto itself is abandoned without being recorded.
//!
//! Worst-case output is exponential in the branching depth (it is a path
//! enumeration, not a reachability test); callers point it at one target at
//! a time.

use skein_core::DependencyGraph;

/// Enumerate all root-to-target dependency chains, each ordered root first
/// and target last.
///
/// Unknown targets produce no chains. A target that is itself a root yields
/// the single chain `[target]`. Chains appear in deterministic order (edge
/// sets iterate sorted).
#[must_use]
pub fn dependency_chains<M>(graph: &DependencyGraph<M>, target: &str) -> Vec<Vec<String>> {
    let mut chains = Vec::new();
    if !graph.contains(target) {
        return chains;
    }

    let mut path: Vec<&str> = vec![target];
    descend(graph, target, &mut path, &mut chains);
    chains
}

/// DFS one branch: `path` currently ends at `current` (target side first).
fn descend<'g, M>(
    graph: &'g DependencyGraph<M>,
    current: &'g str,
    path: &mut Vec<&'g str>,
    chains: &mut Vec<Vec<String>>,
) {
    let Some(node) = graph.node(current) else {
        return;
    };

    if node.dependencies.is_empty() {
        // Reached a root: record target-first path reversed into root-first.
        chains.push(path.iter().rev().map(ToString::to_string).collect());
        return;
    }

    for dep in &node.dependencies {
        // Path-local cycle guard only.
        if path.iter().any(|&seen| seen == dep) {
            continue;
        }
        path.push(dep);
        descend(graph, dep, path, chains);
        path.pop();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
