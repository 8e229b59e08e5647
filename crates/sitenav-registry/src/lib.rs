//! Document registry abstraction for sitenav.
//!
//! A registry answers "does document `id` exist, and where does it live?"
//! for the navigation resolver. Backends are expected to hold an in-memory
//! snapshot of the document corpus; lookups never perform blocking I/O.
//!
//! This crate provides:
//! - [`DocRegistry`]: the lookup trait consumed by the resolver
//! - [`Lookup`]: the three-way lookup result (not found / unique / ambiguous)
//! - [`InMemoryRegistry`]: a snapshot implementation backed by a `HashMap`

pub(crate) mod memory;
pub(crate) mod registry;

pub use memory::InMemoryRegistry;
pub use registry::{DocEntry, DocRegistry, Lookup};
