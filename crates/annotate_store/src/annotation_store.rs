//! Side-table of annotation mappings keyed by declaration.
//!
//! Every declaration owns at most one mapping. Ownership is explicit: a
//! mapping exists only after `init`, and nothing is ever shared between two
//! declarations.

use std::collections::HashMap;

use annotate_foundation::DeclarationId;
use indexmap::IndexMap;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mapping from annotation key to stored record, in insertion order.
pub type AnnotationMap<T> = IndexMap<String, T>;

/// Per-declaration annotation mappings.
///
/// The store does not validate declaration ids; callers check liveness
/// against their [`DeclarationTable`](crate::DeclarationTable) first.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnnotationStore<T> {
    maps: HashMap<DeclarationId, AnnotationMap<T>>,
}

impl<T> Default for AnnotationStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AnnotationStore<T> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            maps: HashMap::new(),
        }
    }

    /// Ensures `id` owns a mapping and returns it.
    ///
    /// Idempotent: an existing mapping is returned untouched.
    pub fn init(&mut self, id: DeclarationId) -> &mut AnnotationMap<T> {
        self.maps.entry(id).or_insert_with(|| {
            trace!(?id, "annotation mapping initialized");
            IndexMap::new()
        })
    }

    /// Returns true if `id` owns an initialized mapping.
    #[must_use]
    pub fn has(&self, id: DeclarationId) -> bool {
        self.maps.contains_key(&id)
    }

    /// Returns the mapping owned by `id`.
    #[must_use]
    pub fn get(&self, id: DeclarationId) -> Option<&AnnotationMap<T>> {
        self.maps.get(&id)
    }

    /// Returns the mapping owned by `id` for mutation.
    pub fn get_mut(&mut self, id: DeclarationId) -> Option<&mut AnnotationMap<T>> {
        self.maps.get_mut(&id)
    }

    /// Installs `map` as the mapping owned by `id`, returning the previous one.
    pub fn replace(&mut self, id: DeclarationId, map: AnnotationMap<T>) -> Option<AnnotationMap<T>> {
        self.maps.insert(id, map)
    }

    /// Drops the mapping owned by `id`.
    pub fn remove(&mut self, id: DeclarationId) -> Option<AnnotationMap<T>> {
        self.maps.remove(&id)
    }

    /// Returns the number of declarations owning a mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Returns true if no declaration owns a mapping.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
