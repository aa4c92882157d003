//! Declaration lifecycle management with generational indices.
//!
//! The `DeclarationTable` allocates identity tokens for functions and classes,
//! records their names, kinds, and parent classes, and tracks generations to
//! detect stale references to removed declarations.

// Allow u64 to usize casts - we target 64-bit systems
#![allow(clippy::cast_possible_truncation)]

use std::sync::Arc;

use annotate_foundation::{DeclarationId, DeclarationKind, Error, Result};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the table knows about one live declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeclarationInfo {
    /// Declared name (not required to be unique).
    pub name: Arc<str>,
    /// Function or class.
    pub kind: DeclarationKind,
    /// Immediate parent class, for subclasses.
    pub parent: Option<DeclarationId>,
}

/// Manages declaration lifecycle and generation tracking.
///
/// Declarations are allocated from a free list when available, otherwise
/// new indices are allocated. When a declaration is removed, its index
/// is added to the free list and its generation is incremented.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeclarationTable {
    /// Generation counter for each index.
    /// Even generations are free, odd generations are alive.
    generations: Vec<u32>,
    /// Declaration metadata, `None` for free slots.
    slots: Vec<Option<DeclarationInfo>>,
    /// Free list of indices available for reuse.
    free_list: Vec<u64>,
    /// Count of live declarations.
    live_count: usize,
}

impl DeclarationTable {
    /// Creates a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new declaration, returns its ID.
    ///
    /// A `parent` must be a live class.
    pub fn spawn(
        &mut self,
        name: impl Into<Arc<str>>,
        kind: DeclarationKind,
        parent: Option<DeclarationId>,
    ) -> Result<DeclarationId> {
        if let Some(parent) = parent {
            if self.get(parent)?.kind != DeclarationKind::Class {
                return Err(Error::not_a_class(parent));
            }
        }

        let info = DeclarationInfo {
            name: name.into(),
            kind,
            parent,
        };
        self.live_count += 1;

        let id = if let Some(index) = self.free_list.pop() {
            let idx = index as usize;
            // Was even/free, now odd/alive
            self.generations[idx] += 1;
            self.slots[idx] = Some(info);
            DeclarationId::new(index, self.generations[idx])
        } else {
            let index = self.generations.len() as u64;
            // New declarations start at generation 1 (odd = alive)
            self.generations.push(1);
            self.slots.push(Some(info));
            DeclarationId::new(index, 1)
        };

        debug!(?id, ?kind, ?parent, "declaration allocated");
        Ok(id)
    }

    /// Removes a declaration and returns what was recorded about it.
    ///
    /// Fails if the id is stale or unknown, or if it is a class with live
    /// subclasses.
    pub fn destroy(&mut self, id: DeclarationId) -> Result<DeclarationInfo> {
        self.validate(id)?;

        let children = self.subclasses(id).len();
        if children > 0 {
            return Err(Error::has_subclasses(id, children));
        }

        let idx = id.index as usize;
        // Was odd/alive, now even/free
        self.generations[idx] += 1;
        self.free_list.push(id.index);
        self.live_count -= 1;

        debug!(?id, "declaration removed");
        self.slots[idx]
            .take()
            .ok_or_else(|| Error::internal(format!("live slot {idx} has no declaration info")))
    }

    /// Checks if a declaration exists and is not stale.
    #[must_use]
    pub fn exists(&self, id: DeclarationId) -> bool {
        self.validate(id).is_ok()
    }

    /// Validates that a declaration is live.
    pub fn validate(&self, id: DeclarationId) -> Result<()> {
        let idx = id.index as usize;

        let Some(&current_gen) = self.generations.get(idx) else {
            return Err(Error::declaration_not_found(id));
        };

        if current_gen != id.generation {
            // Removed and possibly reused
            return Err(Error::stale_declaration(id));
        }

        if current_gen % 2 == 0 {
            return Err(Error::declaration_not_found(id));
        }

        Ok(())
    }

    /// Returns the metadata of a live declaration.
    pub fn get(&self, id: DeclarationId) -> Result<&DeclarationInfo> {
        self.validate(id)?;
        self.slots[id.index as usize]
            .as_ref()
            .ok_or_else(|| Error::declaration_not_found(id))
    }

    /// Returns the kind of a live declaration.
    pub fn kind(&self, id: DeclarationId) -> Result<DeclarationKind> {
        Ok(self.get(id)?.kind)
    }

    /// Returns the name of a live declaration.
    pub fn name(&self, id: DeclarationId) -> Result<&str> {
        Ok(&self.get(id)?.name)
    }

    /// Returns the immediate parent class of a live declaration.
    pub fn parent(&self, id: DeclarationId) -> Result<Option<DeclarationId>> {
        Ok(self.get(id)?.parent)
    }

    /// Returns the ancestors of a declaration, nearest first.
    pub fn ancestors(&self, id: DeclarationId) -> Result<Vec<DeclarationId>> {
        let mut chain = Vec::new();
        let mut current = self.parent(id)?;
        while let Some(ancestor) = current {
            chain.push(ancestor);
            current = self.parent(ancestor)?;
        }
        Ok(chain)
    }

    /// Returns the live direct subclasses of `id`, in allocation order.
    #[must_use]
    pub fn subclasses(&self, id: DeclarationId) -> Vec<DeclarationId> {
        self.iter()
            .filter(|(_, info)| info.parent == Some(id))
            .map(|(child, _)| child)
            .collect()
    }

    /// Returns the total number of live declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if there are no live declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Iterates over all live declarations in index order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclarationId, &DeclarationInfo)> + '_ {
        self.slots
            .iter()
            .zip(&self.generations)
            .enumerate()
            .filter_map(|(idx, (slot, generation))| {
                slot.as_ref()
                    .map(|info| (DeclarationId::new(idx as u64, *generation), info))
            })
    }
}
