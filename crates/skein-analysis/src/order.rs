//! Topological load ordering via Kahn's algorithm.
//!
//! # Overview
//!
//! [`topological_order`] produces a loadable-first sequence: consumers can
//! process it left to right and never hit an entity before something it
//! depends on. In-degree is the size of each node's `dependencies` set;
//! zero-in-degree nodes (the roots) seed the ready set, and finishing a node
//! releases its dependents.
//!
//! A cyclic graph has no such order. The contract is all-or-nothing: when any
//! node remains unprocessed the pass returns `None` rather than a partial
//! prefix, pushing callers to [`crate::cycles::detect_cycles`] for the
//! diagnosis.
//!
//! Ties inside the ready set break lexicographically, so the order is a pure
//! function of the edge set.

use std::collections::BTreeSet;

use skein_core::DependencyGraph;

/// Compute a deterministic topological load order, or `None` if the graph is
/// cyclic.
#[must_use]
pub fn topological_order<M>(graph: &DependencyGraph<M>) -> Option<Vec<String>> {
    let mut order = Vec::with_capacity(graph.len());
    run_kahn(graph, |wave| order.extend(wave)).then_some(order)
}

/// Compute topological *layers*: waves of entities whose dependencies are all
/// satisfied by earlier waves and which can therefore load in parallel.
///
/// Flattening the layers yields exactly [`topological_order`]. Returns `None`
/// for cyclic graphs, matching the flat contract.
#[must_use]
pub fn topological_layers<M>(graph: &DependencyGraph<M>) -> Option<Vec<Vec<String>>> {
    let mut layers = Vec::new();
    run_kahn(graph, |wave| layers.push(wave)).then_some(layers)
}

/// Shared Kahn driver. Feeds each zero-in-degree wave (in ID order) to
/// `emit`; returns `false` when nodes remain unprocessed (a cycle).
fn run_kahn<M>(graph: &DependencyGraph<M>, mut emit: impl FnMut(Vec<String>)) -> bool {
    let mut in_degree: std::collections::BTreeMap<&str, usize> = graph
        .nodes()
        .values()
        .map(|n| (n.id.as_str(), n.dependencies.len()))
        .collect();

    let mut ready: BTreeSet<&str> = in_degree
        .iter()
        .filter_map(|(&id, &deg)| (deg == 0).then_some(id))
        .collect();

    let mut processed = 0_usize;

    while !ready.is_empty() {
        let wave: Vec<&str> = std::mem::take(&mut ready).into_iter().collect();
        processed += wave.len();

        for id in &wave {
            let Some(node) = graph.node(id) else { continue };
            for dependent in &node.dependents {
                if let Some(deg) = in_degree.get_mut(dependent.as_str()) {
                    if *deg > 0 {
                        *deg -= 1;
                        if *deg == 0 {
                            ready.insert(dependent.as_str());
                        }
                    }
                }
            }
        }

        emit(wave.into_iter().map(ToString::to_string).collect());
    }

    processed == graph.len()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)], extra: &[&str]) -> DependencyGraph<()> {
        let mut g = DependencyGraph::new();
        for &(from, to) in edges {
            g.add_dependency(from, to);
        }
        for &id in extra {
            g.insert_entity(id, None);
        }
        g
    }

    #[test]
    fn chain_orders_dependency_first() {
        let g = graph(&[("b", "a"), ("c", "b")], &[]);
        let order = topological_order(&g).expect("acyclic");
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_graph_yields_empty_order() {
        let g: DependencyGraph<()> = DependencyGraph::new();
        assert_eq!(topological_order(&g), Some(Vec::new()));
        assert_eq!(topological_layers(&g), Some(Vec::new()));
    }

    #[test]
    fn every_edge_points_backward_in_the_order() {
        let g = graph(
            &[("d", "b"), ("d", "c"), ("b", "a"), ("c", "a"), ("e", "d")],
            &["lone"],
        );
        let order = topological_order(&g).expect("acyclic");
        assert_eq!(order.len(), g.len());

        let index = |id: &str| order.iter().position(|x| x == id).expect("in order");
        for node in g.nodes().values() {
            for dep in &node.dependencies {
                assert!(
                    index(dep) < index(&node.id),
                    "{dep} must precede {}",
                    node.id
                );
            }
        }
    }

    #[test]
    fn cyclic_graph_has_no_order() {
        let g = graph(&[("a", "b"), ("b", "a")], &[]);
        assert_eq!(topological_order(&g), None);
        assert_eq!(topological_layers(&g), None);
    }

    #[test]
    fn self_loop_has_no_order() {
        let g = graph(&[("a", "a")], &["b"]);
        assert_eq!(topological_order(&g), None);
    }

    #[test]
    fn cycle_with_acyclic_tail_still_refuses_partial_order() {
        // c depends on the a ⇄ b cycle; a partial prefix would be misleading.
        let g = graph(&[("a", "b"), ("b", "a"), ("c", "a")], &[]);
        assert_eq!(topological_order(&g), None);
    }

    #[test]
    fn ready_ties_break_lexicographically() {
        let g = graph(&[("z", "m"), ("z", "a")], &[]);
        let order = topological_order(&g).expect("acyclic");
        assert_eq!(order, vec!["a", "m", "z"]);
    }

    #[test]
    fn layers_group_parallel_work() {
        // a and b are independent roots; c needs both; d needs c.
        let g = graph(&[("c", "a"), ("c", "b"), ("d", "c")], &[]);
        let layers = topological_layers(&g).expect("acyclic");
        assert_eq!(
            layers,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string()],
                vec!["d".to_string()],
            ]
        );
    }

    #[test]
    fn layers_flatten_to_the_flat_order() {
        let g = graph(&[("c", "a"), ("c", "b"), ("d", "c"), ("e", "a")], &[]);
        let flat = topological_order(&g).expect("acyclic");
        let layered: Vec<String> = topological_layers(&g)
            .expect("acyclic")
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(flat, layered);
    }
}
