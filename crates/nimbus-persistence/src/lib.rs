//! Narrow key-value blob store.
//!
//! The shell treats persistence as a best-effort cache: reads fall back to
//! a caller-supplied default on any failure, and write failures are dropped
//! silently (warn-logged). Nothing in here ever surfaces an error to the
//! core.

pub mod store;

pub use store::{JsonBackend, KvBackend, MemoryBackend, Store};
