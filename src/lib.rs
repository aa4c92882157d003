//! annotate - Declaration metadata with repeatable and inherited annotations
//!
//! This crate re-exports all layers of the annotate system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: annotate_engine     — Annotation resolution, subclass hooks, registry
//! Layer 1: annotate_store      — Declaration table, annotation side-table
//! Layer 0: annotate_foundation — Core types (DeclarationId, Value, Error)
//! ```

pub use annotate_engine as engine;
pub use annotate_foundation as foundation;
pub use annotate_store as store;
