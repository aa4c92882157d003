//! The declaration registry.
//!
//! A [`Registry`] is the class-composition system annotations live in: it
//! allocates function and class declarations, runs subclass hooks when a class
//! is derived, and owns every declaration's annotation mapping.
//!
//! # Decorator order
//!
//! [`Registry::decorate`] takes decorators in textual order, outermost first,
//! and applies them innermost first. For single-valued keys the outermost
//! decorator therefore wins; for repeatable keys the list is ordered from the
//! innermost decorator outwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use annotate_foundation::{
    DeclarationId, DeclarationKind, Error, ErrorContext, Result, Value,
};
use annotate_store::{AnnotationMap, AnnotationStore, DeclarationInfo, DeclarationTable};
use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::annotation::Annotation;
use crate::config::EngineConfig;
use crate::extract::extract_annotations;
use crate::hook::{InheritAnnotations, SubclassHook};

/// Declarations, their subclass hooks, and their annotation mappings.
#[derive(Default)]
pub struct Registry {
    declarations: DeclarationTable,
    store: AnnotationStore<Annotation>,
    hooks: HashMap<DeclarationId, Arc<dyn SubclassHook>>,
    config: EngineConfig,
}

impl Registry {
    /// Creates an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Declares a function.
    pub fn define_function(&mut self, name: impl Into<Arc<str>>) -> Result<DeclarationId> {
        self.declarations.spawn(name, DeclarationKind::Function, None)
    }

    /// Declares a class, optionally deriving from `parent`.
    ///
    /// When `parent` is given, the hook it resolves to (its own, or the
    /// nearest ancestor's) runs before this returns. If that hook fails the
    /// class is discarded and the error returned.
    pub fn define_class(
        &mut self,
        name: impl Into<Arc<str>>,
        parent: Option<DeclarationId>,
    ) -> Result<DeclarationId> {
        self.define_class_inner(name.into(), parent, None)
    }

    /// Declares a class carrying its own subclass hook.
    ///
    /// The hook runs for subclasses of the new class, not for the class itself.
    pub fn define_class_with_hook(
        &mut self,
        name: impl Into<Arc<str>>,
        parent: Option<DeclarationId>,
        hook: impl SubclassHook + 'static,
    ) -> Result<DeclarationId> {
        self.define_class_inner(name.into(), parent, Some(Arc::new(hook)))
    }

    fn define_class_inner(
        &mut self,
        name: Arc<str>,
        parent: Option<DeclarationId>,
        hook: Option<Arc<dyn SubclassHook>>,
    ) -> Result<DeclarationId> {
        let child = self
            .declarations
            .spawn(Arc::clone(&name), DeclarationKind::Class, parent)?;
        if let Some(hook) = hook {
            self.hooks.insert(child, hook);
        }

        let Some(parent) = parent else {
            return Ok(child);
        };
        let Some(parent_hook) = self.effective_hook(parent)? else {
            return Ok(child);
        };

        if let Err(err) = parent_hook.on_subclass_created(self, parent, child) {
            self.discard(child);
            return Err(err.or_context(ErrorContext::new().with_declaration(&*name)));
        }
        Ok(child)
    }

    /// Undoes a failed class definition, including any classes the failing
    /// hook derived from it.
    fn discard(&mut self, id: DeclarationId) {
        // Breadth-first, so every class precedes its subclasses.
        let mut doomed = vec![id];
        let mut next = 0;
        while let Some(&class) = doomed.get(next) {
            doomed.extend(self.declarations.subclasses(class));
            next += 1;
        }

        for victim in doomed.into_iter().rev() {
            self.store.remove(victim);
            self.hooks.remove(&victim);
            if let Err(err) = self.declarations.destroy(victim) {
                warn!(id = ?victim, error = %err, "could not discard declaration after failed subclass hook");
            }
        }
    }

    /// Removes a declaration together with its annotations and hook.
    ///
    /// Classes with live subclasses cannot be removed.
    pub fn remove(&mut self, id: DeclarationId) -> Result<()> {
        self.declarations.destroy(id)?;
        self.store.remove(id);
        self.hooks.remove(&id);
        Ok(())
    }

    /// Returns what is recorded about a declaration.
    pub fn declaration(&self, id: DeclarationId) -> Result<&DeclarationInfo> {
        self.declarations.get(id)
    }

    /// Returns the name of a declaration.
    pub fn name(&self, id: DeclarationId) -> Result<&str> {
        self.declarations.name(id)
    }

    /// Returns the kind of a declaration.
    pub fn kind(&self, id: DeclarationId) -> Result<DeclarationKind> {
        self.declarations.kind(id)
    }

    /// Returns the immediate parent class of a declaration.
    pub fn parent(&self, id: DeclarationId) -> Result<Option<DeclarationId>> {
        self.declarations.parent(id)
    }

    /// Returns the ancestors of a declaration, nearest first.
    pub fn ancestors(&self, id: DeclarationId) -> Result<Vec<DeclarationId>> {
        self.declarations.ancestors(id)
    }

    /// Returns the direct subclasses of a class.
    pub fn subclasses(&self, id: DeclarationId) -> Result<Vec<DeclarationId>> {
        self.declarations.validate(id)?;
        Ok(self.declarations.subclasses(id))
    }

    /// Returns true if `id` is live.
    #[must_use]
    pub fn contains(&self, id: DeclarationId) -> bool {
        self.declarations.exists(id)
    }

    /// Iterates over all live declarations.
    pub fn declarations(&self) -> impl Iterator<Item = (DeclarationId, &DeclarationInfo)> + '_ {
        self.declarations.iter()
    }

    /// Returns the number of live declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if nothing has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    // =========================================================================
    // Hooks
    // =========================================================================

    /// Returns true if the class carries a hook of its own (not inherited).
    #[must_use]
    pub fn has_own_hook(&self, id: DeclarationId) -> bool {
        self.hooks.contains_key(&id)
    }

    /// The hook that runs when `class` gains a subclass: its own, otherwise
    /// the nearest ancestor's.
    fn effective_hook(&self, class: DeclarationId) -> Result<Option<Arc<dyn SubclassHook>>> {
        if let Some(hook) = self.hooks.get(&class) {
            return Ok(Some(Arc::clone(hook)));
        }
        for ancestor in self.declarations.ancestors(class)? {
            if let Some(hook) = self.hooks.get(&ancestor) {
                return Ok(Some(Arc::clone(hook)));
            }
        }
        Ok(None)
    }

    fn install_inheritance_hook(&mut self, class: DeclarationId) -> Result<()> {
        let previous = self.effective_hook(class)?;
        let wrapper = InheritAnnotations::wrap(previous);
        debug!(?class, wraps_hook = wrapper.wraps_hook(), "installing inheritance hook");
        self.hooks.insert(class, Arc::new(wrapper));
        Ok(())
    }

    /// Sets `child`'s mapping to the inherited entries of `parent`'s current
    /// mapping.
    pub(crate) fn publish_inherited(&mut self, parent: DeclarationId, child: DeclarationId) -> Result<()> {
        self.declarations.validate(parent)?;
        self.declarations.validate(child)?;

        let inherited: AnnotationMap<Annotation> = self
            .store
            .get(parent)
            .map(|map| {
                map.iter()
                    .filter(|(_, annotation)| annotation.inherited())
                    .map(|(key, annotation)| (key.clone(), annotation.clone()))
                    .collect()
            })
            .unwrap_or_default();

        debug!(?parent, ?child, count = inherited.len(), "publishing inherited annotations");
        self.store.replace(child, inherited);
        Ok(())
    }

    // =========================================================================
    // Annotations
    // =========================================================================

    /// Applies `annotation` to `target` and returns `target`.
    ///
    /// Fails before touching anything when the target kind is not allowed or
    /// the key is stored with the other multiplicity (under
    /// [`ConflictPolicy::Reject`](crate::ConflictPolicy::Reject)). The first
    /// application to a class installs its inheritance hook.
    pub fn apply(&mut self, annotation: &Annotation, target: DeclarationId) -> Result<DeclarationId> {
        let info = self.declarations.get(target)?;
        let kind = info.kind;
        let context = || {
            ErrorContext::new()
                .with_declaration(&*info.name)
                .with_key(annotation.key())
        };

        if !annotation.targets().contains(kind) {
            return Err(Error::target_mismatch(annotation.key(), kind, annotation.targets())
                .with_context(context()));
        }

        let existing = self
            .store
            .get(target)
            .and_then(|map| map.get(annotation.key()));
        annotation
            .check_conflict(existing, self.config.conflict_policy)
            .map_err(|err| err.with_context(context()))?;

        if kind == DeclarationKind::Class && !self.store.has(target) {
            self.install_inheritance_hook(target)?;
        }

        let map = self.store.init(target);
        annotation.merge_into(map)?;
        trace!(?target, key = annotation.key(), repeatable = annotation.repeatable(), "annotation applied");
        Ok(target)
    }

    /// Applies a stack of decorators written outermost first.
    ///
    /// The innermost (last) decorator is applied first. Stops at the first
    /// failure; decorators applied before it stay applied.
    pub fn decorate<'a, I>(&mut self, target: DeclarationId, decorators: I) -> Result<DeclarationId>
    where
        I: IntoIterator<Item = &'a Annotation>,
        I::IntoIter: DoubleEndedIterator,
    {
        for annotation in decorators.into_iter().rev() {
            self.apply(annotation, target)?;
        }
        Ok(target)
    }

    /// Returns the mapping `id` owns, if any annotation was ever applied to
    /// it or it inherited one.
    pub fn annotations(&self, id: DeclarationId) -> Result<Option<&AnnotationMap<Annotation>>> {
        self.declarations.validate(id)?;
        Ok(self.store.get(id))
    }

    /// Returns one stored annotation.
    pub fn annotation(&self, id: DeclarationId, key: &str) -> Result<Option<&Annotation>> {
        Ok(self.annotations(id)?.and_then(|map| map.get(key)))
    }

    /// Returns true if `id` owns an annotation mapping.
    pub fn has_annotations(&self, id: DeclarationId) -> Result<bool> {
        self.declarations.validate(id)?;
        Ok(self.store.has(id))
    }

    /// Plain `{key: value}` view of `id`'s mapping.
    pub fn extract(&self, id: DeclarationId) -> Result<IndexMap<String, Value>> {
        extract_annotations(self, id)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("declarations", &self.declarations.len())
            .field("annotated", &self.store.len())
            .field("hooks", &self.hooks.len())
            .field("config", &self.config)
            .finish()
    }
}
