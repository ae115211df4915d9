#![forbid(unsafe_code)]
//! skein-analysis library.
//!
//! Pure, stateless passes over a `skein-core` [`DependencyGraph`]: cycle
//! enumeration, topological load ordering, statistics, root-to-target chain
//! tracing, visualization export, and the one-call [`analyze`] orchestration.
//! Every pass reads whatever graph is current — full builds and incremental
//! mutation feed the same code.
//!
//! # Conventions
//!
//! - **Errors**: Cyclic or degraded input is never an error here; passes
//!   return `Option` / empty collections and let callers decide.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`,
//!   `trace!`).
//!
//! [`DependencyGraph`]: skein_core::DependencyGraph

pub mod analyze;
pub mod chains;
pub mod cycles;
pub mod order;
pub mod report;
pub mod stats;
pub mod viz;

// Re-export primary types at crate level for convenience.
pub use analyze::{DependencyAnalysisResult, analyze};
pub use chains::dependency_chains;
pub use cycles::{CircularDependency, detect_cycles, would_create_cycle};
pub use order::{topological_layers, topological_order};
pub use report::format_report;
pub use stats::{GraphStats, statistics, statistics_with_cycles};
pub use viz::{
    NodeRole, VisualizationData, VisualizationEdge, VisualizationNode, export,
    export_with_cycles,
};
