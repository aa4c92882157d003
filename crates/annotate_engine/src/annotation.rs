//! Annotation descriptors and their resolution against a declaration's mapping.
//!
//! An [`Annotation`] is built once (key, value, modifiers, targets) and can be
//! applied to any number of declarations. Applying it resolves overwrite versus
//! accumulate semantics against the mapping the declaration owns:
//!
//! - single-valued: the stored entry is replaced, so the last application wins
//! - repeatable: the first application stores `[value]`, later ones append

use annotate_foundation::{
    DeclarationId, Error, LtVec, Multiplicity, Result, Targets, Value,
};
use annotate_store::AnnotationMap;
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConflictPolicy;
use crate::registry::Registry;

/// One piece of metadata and how it behaves.
///
/// Modifiers are fixed once the annotation is built; the stored copy of a
/// repeatable annotation differs only in carrying the accumulated list as its
/// value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Annotation {
    key: String,
    value: Value,
    inherited: bool,
    repeatable: bool,
    targets: Targets,
}

impl Annotation {
    /// Creates a single-valued, non-inherited annotation that may target any
    /// declaration.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            inherited: false,
            repeatable: false,
            targets: Targets::ANY,
        }
    }

    /// Builder method to set whether subclasses inherit this annotation.
    #[must_use]
    pub fn with_inherited(mut self, inherited: bool) -> Self {
        self.inherited = inherited;
        self
    }

    /// Builder method to set whether applications accumulate.
    #[must_use]
    pub fn with_repeatable(mut self, repeatable: bool) -> Self {
        self.repeatable = repeatable;
        self
    }

    /// Builder method to restrict the declaration kinds this annotation may
    /// be applied to.
    #[must_use]
    pub fn with_targets(mut self, targets: impl Into<Targets>) -> Self {
        self.targets = targets.into();
        self
    }

    /// Builder method to replace the value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// The annotation key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The payload, or the accumulated list for a stored repeatable entry.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether subclasses receive this annotation.
    #[must_use]
    pub fn inherited(&self) -> bool {
        self.inherited
    }

    /// Whether applications accumulate into a list.
    #[must_use]
    pub fn repeatable(&self) -> bool {
        self.repeatable
    }

    /// The declaration kinds this annotation may be applied to.
    #[must_use]
    pub fn targets(&self) -> Targets {
        self.targets
    }

    /// Overwrite or accumulate, as an enum.
    #[must_use]
    pub fn multiplicity(&self) -> Multiplicity {
        Multiplicity::from_repeatable(self.repeatable)
    }

    /// Applies this annotation to `target`, returning `target`.
    ///
    /// Same as [`Registry::apply`].
    pub fn apply(&self, registry: &mut Registry, target: DeclarationId) -> Result<DeclarationId> {
        registry.apply(self, target)
    }

    /// Fails if `existing` was stored with the other multiplicity and the
    /// policy does not allow replacing it.
    pub(crate) fn check_conflict(
        &self,
        existing: Option<&Annotation>,
        policy: ConflictPolicy,
    ) -> Result<()> {
        match existing {
            Some(stored) if stored.repeatable != self.repeatable && policy == ConflictPolicy::Reject => {
                Err(Error::conflict(
                    self.key.clone(),
                    stored.multiplicity(),
                    self.multiplicity(),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Merges this application into `map`.
    ///
    /// Callers run [`check_conflict`](Self::check_conflict) first; a mixed
    /// application reaching this point is resolved by replacement.
    pub(crate) fn merge_into(&self, map: &mut AnnotationMap<Annotation>) -> Result<()> {
        let stored = map.get(&self.key).map(|entry| entry.repeatable);

        match stored {
            Some(true) if self.repeatable => {
                let entry = map
                    .get_mut(&self.key)
                    .ok_or_else(|| Error::internal(format!("entry {:?} vanished", self.key)))?;
                let Value::List(items) = &entry.value else {
                    return Err(Error::internal(format!(
                        "repeatable entry {:?} holds a {} instead of a list",
                        self.key,
                        entry.value.type_name()
                    )));
                };
                entry.value = Value::List(items.push_back(self.value.clone()));
            }
            Some(repeatable) if repeatable != self.repeatable => {
                warn!(
                    key = %self.key,
                    existing = %Multiplicity::from_repeatable(repeatable),
                    incoming = %self.multiplicity(),
                    "replacing annotation stored with a different multiplicity"
                );
                map.insert(self.key.clone(), self.seed());
            }
            _ => {
                map.insert(self.key.clone(), self.seed());
            }
        }
        Ok(())
    }

    /// The entry stored by a first application: a copy of `self`, with a
    /// fresh single-element list as value when repeatable.
    fn seed(&self) -> Annotation {
        if self.repeatable {
            Annotation {
                value: Value::List(LtVec::unit(self.value.clone())),
                ..self.clone()
            }
        } else {
            self.clone()
        }
    }
}
