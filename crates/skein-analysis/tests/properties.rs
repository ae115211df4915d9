//! Algebraic properties that must hold for every graph the engine can
//! produce, checked over randomized registries.

use std::collections::BTreeMap;

use anyhow::Result;
use proptest::prelude::*;

use skein_analysis::{analyze, detect_cycles, topological_order};
use skein_core::{DependencyGraph, verify};

/// Entity IDs `n00` … `n11`; resolver output may also name `n12` … `n15`,
/// which are absent from the registry and must be dropped.
fn registry_from_edges(edges: &[(u8, u8)]) -> BTreeMap<String, Vec<String>> {
    let mut registry: BTreeMap<String, Vec<String>> =
        (0..12_u8).map(|i| (format!("n{i:02}"), Vec::new())).collect();
    for &(from, to) in edges {
        let from_id = format!("n{:02}", from % 12);
        let to_id = format!("n{to:02}");
        if let Some(deps) = registry.get_mut(&from_id) {
            deps.push(to_id);
        }
    }
    registry
}

fn list_resolver(meta: &Vec<String>) -> Result<Vec<String>> {
    Ok(meta.clone())
}

fn edge_strategy() -> impl Strategy<Value = Vec<(u8, u8)>> {
    prop::collection::vec((0_u8..12, 0_u8..16), 0..48)
}

proptest! {
    #[test]
    fn structure_is_mirrored_and_counts_agree(edges in edge_strategy()) {
        let result = analyze(registry_from_edges(&edges), &list_resolver);
        let graph = &result.graph;

        prop_assert!(verify(graph).is_ok());

        let dependency_sum: usize = graph.nodes().values().map(|n| n.dependencies.len()).sum();
        let dependent_sum: usize = graph.nodes().values().map(|n| n.dependents.len()).sum();
        prop_assert_eq!(dependency_sum, graph.edge_count());
        prop_assert_eq!(dependent_sum, graph.edge_count());

        // Unknown references never materialize nodes.
        prop_assert_eq!(graph.len(), 12);
        for node in graph.nodes().values() {
            for dep in &node.dependencies {
                prop_assert!(graph.contains(dep));
            }
        }
    }

    #[test]
    fn order_exists_exactly_when_acyclic(edges in edge_strategy()) {
        let result = analyze(registry_from_edges(&edges), &list_resolver);

        match &result.topological_order {
            Some(order) => {
                prop_assert!(result.cycles.is_empty());
                prop_assert_eq!(order.len(), result.graph.len());

                // Every dependency appears before its dependent.
                let position: BTreeMap<&str, usize> = order
                    .iter()
                    .enumerate()
                    .map(|(i, id)| (id.as_str(), i))
                    .collect();
                for node in result.graph.nodes().values() {
                    for dep in &node.dependencies {
                        prop_assert!(position[dep.as_str()] < position[node.id.as_str()]);
                    }
                }
            }
            None => prop_assert!(!result.cycles.is_empty()),
        }
    }

    #[test]
    fn analysis_is_idempotent(edges in edge_strategy()) {
        let first = analyze(registry_from_edges(&edges), &list_resolver);
        let second = analyze(registry_from_edges(&edges), &list_resolver);

        prop_assert_eq!(&first.graph, &second.graph);
        prop_assert_eq!(&first.cycles, &second.cycles);
        prop_assert_eq!(&first.topological_order, &second.topological_order);
        prop_assert_eq!(first.graph.content_hash(), second.graph.content_hash());
    }

    #[test]
    fn add_then_remove_restores_edge_sets(
        edges in edge_strategy(),
        from in 0_u8..12,
        to in 0_u8..12,
    ) {
        let mut graph: DependencyGraph<()> = DependencyGraph::new();
        for (f, t) in &edges {
            graph.add_dependency(&format!("n{:02}", f % 12), &format!("n{:02}", t % 12));
        }

        let from_id = format!("n{from:02}");
        let to_id = format!("n{to:02}");
        prop_assume!(
            !graph
                .node(&from_id)
                .is_some_and(|n| n.dependencies.contains(&to_id))
        );

        let deps_before = graph.node(&from_id).map(|n| n.dependencies.clone());
        let dependents_before = graph.node(&to_id).map(|n| n.dependents.clone());

        graph.add_dependency(&from_id, &to_id);
        graph.remove_dependency(&from_id, &to_id);

        prop_assert!(verify(&graph).is_ok());
        prop_assert_eq!(
            graph.node(&from_id).map(|n| n.dependencies.clone()),
            deps_before.or_else(|| Some(std::collections::BTreeSet::new()))
        );
        prop_assert_eq!(
            graph.node(&to_id).map(|n| n.dependents.clone()),
            dependents_before.or_else(|| Some(std::collections::BTreeSet::new()))
        );
    }

    #[test]
    fn detector_and_order_agree_under_mutation(edges in edge_strategy()) {
        let mut graph: DependencyGraph<()> = DependencyGraph::new();
        for (f, t) in &edges {
            graph.add_dependency(&format!("n{:02}", f % 12), &format!("n{:02}", t % 12));
        }

        prop_assert_eq!(
            topological_order(&graph).is_none(),
            !detect_cycles(&graph).is_empty()
        );
    }
}
