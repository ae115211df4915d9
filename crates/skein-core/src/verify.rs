//! Structural invariant audit for dependency graphs.
//!
//! Walks the arena and checks the properties every build and mutation must
//! preserve: edges only reference IDs present in the arena, and every edge is
//! mirrored (`B ∈ A.dependencies ⇔ A ∈ B.dependents`). The edge-count
//! identity `Σ|dependencies| == Σ|dependents|` follows from the mirror check.
//!
//! Intended for tests and debug assertions; O(V + E).

use thiserror::Error;

use crate::node::DependencyGraph;

/// A structural invariant the graph failed to uphold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// `from.dependencies` names an ID with no node in the arena.
    #[error("edge '{from}' -> '{to}' references an ID absent from the graph")]
    DanglingDependency {
        /// Source of the dangling edge.
        from: String,
        /// The missing target ID.
        to: String,
    },

    /// `to.dependents` names an ID with no node in the arena.
    #[error("dependent entry '{to}' <- '{from}' references an ID absent from the graph")]
    DanglingDependent {
        /// The missing source ID.
        from: String,
        /// Node carrying the dangling entry.
        to: String,
    },

    /// An edge exists in `from.dependencies` without its mirror entry.
    #[error("edge '{from}' -> '{to}' is not mirrored in the target's dependents")]
    MissingDependentMirror {
        /// Source of the unmirrored edge.
        from: String,
        /// Target whose `dependents` set is missing the entry.
        to: String,
    },

    /// A `dependents` entry exists without the forward edge.
    #[error("dependent entry '{to}' <- '{from}' has no matching dependency edge")]
    MissingDependencyMirror {
        /// Source that should carry the forward edge.
        from: String,
        /// Node carrying the orphaned dependents entry.
        to: String,
    },
}

/// Audit the graph's structural invariants, reporting the first violation.
///
/// # Errors
///
/// Returns the first [`InvariantViolation`] found, scanning nodes in ID
/// order.
pub fn verify<M>(graph: &DependencyGraph<M>) -> Result<(), InvariantViolation> {
    for node in graph.nodes().values() {
        for dep in &node.dependencies {
            let Some(target) = graph.node(dep) else {
                return Err(InvariantViolation::DanglingDependency {
                    from: node.id.clone(),
                    to: dep.clone(),
                });
            };
            if !target.dependents.contains(&node.id) {
                return Err(InvariantViolation::MissingDependentMirror {
                    from: node.id.clone(),
                    to: dep.clone(),
                });
            }
        }
        for dependent in &node.dependents {
            let Some(source) = graph.node(dependent) else {
                return Err(InvariantViolation::DanglingDependent {
                    from: dependent.clone(),
                    to: node.id.clone(),
                });
            };
            if !source.dependencies.contains(&node.id) {
                return Err(InvariantViolation::MissingDependencyMirror {
                    from: dependent.clone(),
                    to: node.id.clone(),
                });
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
