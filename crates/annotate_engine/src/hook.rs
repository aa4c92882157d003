//! Subclass hooks.
//!
//! A class may carry a [`SubclassHook`]. When a subclass is defined, the
//! registry runs the hook of the parent class, or of the nearest ancestor
//! that has one. Annotating a class for the first time wraps whatever hook it
//! currently resolves to in [`InheritAnnotations`], which publishes the
//! parent's inherited annotations onto each new subclass.

use std::fmt;
use std::sync::Arc;

use annotate_foundation::{DeclarationId, Result};

use crate::registry::Registry;

/// Extension point invoked when a class gains a subclass.
///
/// `parent` is the immediate parent of `child`; `child` is already allocated
/// and carries its own hook, if it was defined with one. Returning an error
/// aborts the subclass definition.
///
/// Closures with the matching signature implement this trait.
pub trait SubclassHook: Send + Sync {
    /// Called once per subclass, at its definition.
    fn on_subclass_created(
        &self,
        registry: &mut Registry,
        parent: DeclarationId,
        child: DeclarationId,
    ) -> Result<()>;
}

impl<F> SubclassHook for F
where
    F: Fn(&mut Registry, DeclarationId, DeclarationId) -> Result<()> + Send + Sync,
{
    fn on_subclass_created(
        &self,
        registry: &mut Registry,
        parent: DeclarationId,
        child: DeclarationId,
    ) -> Result<()> {
        self(registry, parent, child)
    }
}

/// Hook installed on a class by its first annotation.
///
/// Runs the wrapped hook first, then sets the child's mapping to the
/// parent's inherited entries. The replacement is total: anything the wrapped
/// hook applied to the child is discarded.
#[derive(Clone)]
pub struct InheritAnnotations {
    inner: Option<Arc<dyn SubclassHook>>,
}

impl InheritAnnotations {
    /// Wraps the hook the class resolved to before it was annotated.
    #[must_use]
    pub fn wrap(inner: Option<Arc<dyn SubclassHook>>) -> Self {
        Self { inner }
    }

    /// Returns true if a previously effective hook is preserved.
    #[must_use]
    pub fn wraps_hook(&self) -> bool {
        self.inner.is_some()
    }
}

impl SubclassHook for InheritAnnotations {
    fn on_subclass_created(
        &self,
        registry: &mut Registry,
        parent: DeclarationId,
        child: DeclarationId,
    ) -> Result<()> {
        if let Some(inner) = &self.inner {
            inner.on_subclass_created(registry, parent, child)?;
        }
        registry.publish_inherited(parent, child)
    }
}

impl fmt::Debug for InheritAnnotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InheritAnnotations")
            .field("wraps_hook", &self.wraps_hook())
            .finish()
    }
}
