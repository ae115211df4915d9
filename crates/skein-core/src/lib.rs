#![forbid(unsafe_code)]
//! skein-core library.
//!
//! Owning arena for dependency graphs over uniquely-keyed entities, plus the
//! pieces that populate and mutate it: the pluggable [`DependencyResolver`]
//! seam, the [`build()`] pass, the depth calculator, and the incremental
//! mutator. Pure analysis passes (cycles, ordering, statistics) live in
//! `skein-analysis`.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for fallible seams (the resolver).
//!   Structural invariant violations are the typed
//!   [`verify::InvariantViolation`] enum.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`,
//!   `trace!`).

pub mod build;
pub mod depth;
pub mod mutate;
pub mod node;
pub mod resolver;
pub mod verify;

// Re-export primary types at crate level for convenience.
pub use build::{BuildOutcome, ResolverFailure, build};
pub use depth::compute_depths;
pub use node::{DependencyGraph, DependencyNode};
pub use resolver::DependencyResolver;
pub use verify::{InvariantViolation, verify};
