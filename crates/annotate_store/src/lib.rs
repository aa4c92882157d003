//! Declaration table and annotation side-table storage for annotate.
//!
//! This crate provides:
//! - [`DeclarationTable`] - Generational declaration allocation with names,
//!   kinds, and parent links
//! - [`AnnotationStore`] - Per-declaration annotation mappings (`init`/`has`/`get`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod annotation_store;
pub mod declaration;

pub use annotation_store::{AnnotationMap, AnnotationStore};
pub use declaration::{DeclarationInfo, DeclarationTable};
