//! Pluggable dependency resolution seam.
//!
//! A resolver extracts raw dependency IDs from one entity's opaque metadata.
//! It is passed explicitly to every build — never stored as process-wide
//! state — so two analyses with different resolvers can run side by side.
//!
//! The blanket impl lets plain closures act as resolvers:
//!
//! ```rust
//! use anyhow::Result;
//! use skein_core::DependencyResolver;
//!
//! let resolver = |meta: &Vec<String>| -> Result<Vec<String>> { Ok(meta.clone()) };
//! let deps = resolver.resolve(&vec!["base".to_string()]).expect("resolves");
//! assert_eq!(deps, vec!["base".to_string()]);
//! ```

use anyhow::Result;

/// Extracts the raw dependency ID list from one entity's metadata.
///
/// Returned IDs are *raw*: they may reference entities absent from the
/// registry (dropped during the build) or the entity itself (surfaces as a
/// one-node cycle). Implementations should not try to validate against the
/// registry — that is the builder's job.
pub trait DependencyResolver<M> {
    /// Resolve the dependency IDs declared by `metadata`.
    ///
    /// # Errors
    ///
    /// A failed resolution is non-fatal: the builder treats the entity as
    /// dependency-free and records a [`crate::build::ResolverFailure`]
    /// diagnostic instead of aborting.
    fn resolve(&self, metadata: &M) -> Result<Vec<String>>;
}

impl<M, F> DependencyResolver<M> for F
where
    F: Fn(&M) -> Result<Vec<String>>,
{
    fn resolve(&self, metadata: &M) -> Result<Vec<String>> {
        self(metadata)
    }
}
