//! Cycle enumeration and pre-flight cycle checks.
//!
//! # Overview
//!
//! [`detect_cycles`] runs an iterative DFS with an explicit recursion stack
//! over **every** node — not just roots, since a pure cycle has no root at
//! all. An edge into a node currently on the DFS path is a back-edge; the
//! path slice from that node onward, closed with a repeat of its first ID,
//! is one reported cycle. Each back-edge yields its own entry, so
//! overlapping loops through shared nodes are reported independently.
//! Self-loops need no special casing — they are back-edges of length one.
//!
//! [`would_create_cycle`] answers the incremental question: would adding
//! `from → to` close a loop? Callers use it to warn before committing an
//! edge via the mutator.
//!
//! Both scans are O(V + E) and fully deterministic: nodes are visited in ID
//! order and edge sets iterate sorted.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::fmt;

use skein_core::DependencyGraph;

// ---------------------------------------------------------------------------
// CircularDependency
// ---------------------------------------------------------------------------

/// One detected dependency cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularDependency {
    /// Ordered IDs forming the closed loop, first ID repeated at the end.
    /// `["a", "b", "a"]` reads "a depends on b depends on a".
    pub cycle: Vec<String>,
    /// Number of distinct nodes on the loop.
    pub size: usize,
    /// De-duplicated set of IDs on the loop.
    pub affected: BTreeSet<String>,
}

impl CircularDependency {
    fn from_closed_loop(cycle: Vec<String>) -> Self {
        let distinct: BTreeSet<String> = cycle[..cycle.len() - 1].iter().cloned().collect();
        Self {
            size: distinct.len(),
            affected: distinct,
            cycle,
        }
    }

    /// Return `true` if this is a node depending on itself.
    #[must_use]
    pub const fn is_self_loop(&self) -> bool {
        self.size == 1
    }
}

impl fmt::Display for CircularDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_self_loop() {
            write!(f, "self-loop on '{}'", self.cycle[0])
        } else {
            write!(
                f,
                "cycle of {} entities: {}",
                self.size,
                self.cycle.join(" → ")
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Full scan
// ---------------------------------------------------------------------------

/// Enumerate every cycle the DFS scan discovers, in deterministic order.
///
/// An empty result means the graph is a DAG and a topological order exists.
#[must_use]
pub fn detect_cycles<M>(graph: &DependencyGraph<M>) -> Vec<CircularDependency> {
    let mut cycles = Vec::new();
    // Gray-or-black set; gray nodes are exactly those on `path`.
    let mut visited: HashSet<&str> = HashSet::with_capacity(graph.len());
    let mut path: Vec<&str> = Vec::new();
    let mut on_path: HashSet<&str> = HashSet::new();

    // Each frame: (node, sorted outgoing neighbors, next neighbor index).
    let mut stack: Vec<(&str, Vec<&str>, usize)> = Vec::new();

    for start in graph.nodes().keys() {
        if visited.contains(start.as_str()) {
            continue;
        }
        visited.insert(start);
        path.push(start);
        on_path.insert(start);
        stack.push((start, neighbors(graph, start), 0));

        while let Some(frame) = stack.last_mut() {
            let current = frame.0;
            if frame.2 < frame.1.len() {
                let next = frame.1[frame.2];
                frame.2 += 1;

                if on_path.contains(next) {
                    // Back-edge: close the loop from `next`'s position on the
                    // current path through `current`.
                    let pos = path
                        .iter()
                        .position(|&id| id == next)
                        .unwrap_or_default();
                    let mut cycle: Vec<String> =
                        path[pos..].iter().map(ToString::to_string).collect();
                    cycle.push(next.to_string());
                    cycles.push(CircularDependency::from_closed_loop(cycle));
                } else if !visited.contains(next) {
                    visited.insert(next);
                    path.push(next);
                    on_path.insert(next);
                    stack.push((next, neighbors(graph, next), 0));
                }
            } else {
                stack.pop();
                path.pop();
                on_path.remove(current);
            }
        }
    }

    cycles
}

fn neighbors<'g, M>(graph: &'g DependencyGraph<M>, id: &str) -> Vec<&'g str> {
    graph
        .node(id)
        .map(|n| n.dependencies.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Pre-flight check for incremental edges
// ---------------------------------------------------------------------------

/// Check whether adding `from → to` would introduce a cycle.
///
/// Returns the concrete closing path `from → to → … → from` when it would,
/// `None` otherwise. Adding an edge that already exists creates no *new*
/// cycle and returns `None`.
#[must_use]
pub fn would_create_cycle<M>(
    graph: &DependencyGraph<M>,
    from: &str,
    to: &str,
) -> Option<Vec<String>> {
    if from == to {
        return Some(vec![from.to_string(), from.to_string()]);
    }
    if graph
        .node(from)
        .is_some_and(|n| n.dependencies.contains(to))
    {
        return None;
    }

    // BFS from `to` along dependencies looking for `from`: if `from` is
    // reachable, the new edge closes a loop.
    let mut queue: VecDeque<&str> = VecDeque::from([to]);
    let mut seen: HashSet<&str> = HashSet::from([to]);
    let mut parent: BTreeMap<&str, &str> = BTreeMap::new();

    while let Some(current) = queue.pop_front() {
        if current == from {
            return Some(closing_path(from, to, &parent));
        }
        for next in neighbors(graph, current) {
            if seen.insert(next) {
                parent.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    None
}

/// Rebuild `from → to → … → from` from BFS parent links.
fn closing_path(from: &str, to: &str, parent: &BTreeMap<&str, &str>) -> Vec<String> {
    // Parent links encode a path to → … → from; walk it backwards.
    let mut tail: Vec<&str> = vec![from];
    let mut cursor = from;
    while cursor != to {
        match parent.get(cursor) {
            Some(&prev) => {
                cursor = prev;
                tail.push(cursor);
            }
            None => break,
        }
    }
    tail.reverse();

    let mut path: Vec<String> = Vec::with_capacity(tail.len() + 1);
    path.push(from.to_string());
    path.extend(tail.into_iter().map(ToString::to_string));
    path
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
