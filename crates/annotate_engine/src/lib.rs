//! Annotation resolution, subclass inheritance hooks, and the declaration
//! registry for annotate.
//!
//! This crate provides:
//! - [`Annotation`] - A key/value record with `inherited`, `repeatable`, and
//!   target modifiers, applied to declarations
//! - [`Registry`] - Declares functions and classes and owns their annotations
//! - [`SubclassHook`] - Extension point run when a class gains a subclass
//! - [`extract_annotations`] - Plain `{key: value}` view of a declaration
//! - [`SharedRegistry`] - Lock-guarded registry for concurrent loading
//! - Builders ([`description`], [`marker`], [`AnnotationFactory`])
//!
//! # Example
//!
//! ```
//! use annotate_engine::{description, Annotation, Registry, Value};
//!
//! let mut registry = Registry::new();
//! let foo = registry.define_class("Foo", None).unwrap();
//! registry
//!     .decorate(foo, &[description("awesome!"), description("cool!")])
//!     .unwrap();
//! registry
//!     .apply(&Annotation::new("owner", "core").with_inherited(true), foo)
//!     .unwrap();
//!
//! let bar = registry.define_class("Bar", Some(foo)).unwrap();
//!
//! let foo_view = registry.extract(foo).unwrap();
//! assert_eq!(foo_view["description"], Value::list(["cool!", "awesome!"]));
//!
//! let bar_view = registry.extract(bar).unwrap();
//! assert_eq!(bar_view["owner"], Value::from("core"));
//! assert!(!bar_view.contains_key("description"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod annotation;
pub mod builders;
pub mod config;
pub mod extract;
pub mod hook;
pub mod registry;
pub mod shared;

pub use annotation::Annotation;
pub use builders::{AnnotationFactory, DESCRIPTION, description, marker};
pub use config::{ConflictPolicy, EngineConfig};
pub use extract::extract_annotations;
pub use hook::{InheritAnnotations, SubclassHook};
pub use registry::Registry;
pub use shared::SharedRegistry;

pub use annotate_foundation::{
    DeclarationId, DeclarationKind, Error, ErrorKind, Result, Targets, Value,
};
pub use annotate_store::AnnotationMap;
