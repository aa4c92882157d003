//! Core types, values, and errors for annotate.
//!
//! This crate provides:
//! - [`DeclarationId`] - Generational declaration identifiers
//! - [`DeclarationKind`] and [`Targets`] - What an annotation may attach to
//! - [`Value`] - The payload type carried by annotations
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`LtVec`], [`LtMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod declaration;
pub mod error;
pub mod value;

pub use collections::{LtMap, LtVec};
pub use declaration::{DeclarationId, DeclarationKind, Targets};
pub use error::{Error, ErrorContext, ErrorKind, Multiplicity, Result};
pub use value::Value;
