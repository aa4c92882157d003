//! Registry shared between threads.
//!
//! Every mutating call holds the write lock for its whole duration, so the
//! `has`/`init`/mutate sequence of an application and the hooks run by a
//! subclass definition are never interleaved with another writer.

use std::sync::Arc;

use annotate_foundation::{DeclarationId, Result, Value};
use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::annotation::Annotation;
use crate::config::EngineConfig;
use crate::hook::SubclassHook;
use crate::registry::Registry;

/// Cloneable handle to a lock-guarded [`Registry`].
#[derive(Clone, Debug, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    /// Wraps an existing registry.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Creates an empty shared registry with the given configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self::new(Registry::with_config(config))
    }

    /// Declares a function.
    pub fn define_function(&self, name: impl Into<Arc<str>>) -> Result<DeclarationId> {
        self.inner.write().define_function(name)
    }

    /// Declares a class; see [`Registry::define_class`].
    pub fn define_class(
        &self,
        name: impl Into<Arc<str>>,
        parent: Option<DeclarationId>,
    ) -> Result<DeclarationId> {
        self.inner.write().define_class(name, parent)
    }

    /// Declares a class with its own hook; see [`Registry::define_class_with_hook`].
    pub fn define_class_with_hook(
        &self,
        name: impl Into<Arc<str>>,
        parent: Option<DeclarationId>,
        hook: impl SubclassHook + 'static,
    ) -> Result<DeclarationId> {
        self.inner.write().define_class_with_hook(name, parent, hook)
    }

    /// Applies an annotation; see [`Registry::apply`].
    pub fn apply(&self, annotation: &Annotation, target: DeclarationId) -> Result<DeclarationId> {
        self.inner.write().apply(annotation, target)
    }

    /// Applies a decorator stack; see [`Registry::decorate`].
    pub fn decorate<'a, I>(&self, target: DeclarationId, decorators: I) -> Result<DeclarationId>
    where
        I: IntoIterator<Item = &'a Annotation>,
        I::IntoIter: DoubleEndedIterator,
    {
        self.inner.write().decorate(target, decorators)
    }

    /// Removes a declaration; see [`Registry::remove`].
    pub fn remove(&self, id: DeclarationId) -> Result<()> {
        self.inner.write().remove(id)
    }

    /// Plain `{key: value}` view of `id`'s mapping.
    pub fn extract(&self, id: DeclarationId) -> Result<IndexMap<String, Value>> {
        self.inner.read().extract(id)
    }

    /// Locks the registry for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.inner.read()
    }

    /// Locks the registry for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.inner.write()
    }
}
