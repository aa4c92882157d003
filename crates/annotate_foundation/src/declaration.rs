//! Declaration identifiers, kinds, and annotation target sets.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Declaration identifier with generational index for stale reference detection.
///
/// The generation counter increments when a declaration slot is reused after
/// removal, so an id held past its declaration's removal is detected as stale.
///
/// # Layout
/// - `index`: 64-bit index into declaration storage
/// - `generation`: 32-bit generation counter
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeclarationId {
    /// Index into declaration storage.
    pub index: u64,
    /// Generation counter for stale reference detection.
    pub generation: u32,
}

impl DeclarationId {
    /// Creates a new declaration ID with the given index and generation.
    #[must_use]
    pub const fn new(index: u64, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Debug for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclarationId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Declaration({})", self.index)
    }
}

/// The kind of a declaration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeclarationKind {
    /// A class; may be subclassed and carries subclass hooks.
    Class,
    /// A free function or any other non-class object.
    Function,
}

impl DeclarationKind {
    const fn bit(self) -> u8 {
        match self {
            Self::Class => 0b01,
            Self::Function => 0b10,
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Function => write!(f, "function"),
        }
    }
}

/// Set of declaration kinds an annotation may be applied to.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Targets(u8);

impl Targets {
    /// No declaration kinds.
    pub const NONE: Targets = Targets(0);
    /// Classes only.
    pub const CLASS: Targets = Targets(DeclarationKind::Class.bit());
    /// Functions only.
    pub const FUNCTION: Targets = Targets(DeclarationKind::Function.bit());
    /// Every declaration kind.
    pub const ANY: Targets = Targets(DeclarationKind::Class.bit() | DeclarationKind::Function.bit());

    /// Returns true if `kind` is in this set.
    #[must_use]
    pub const fn contains(self, kind: DeclarationKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns this set with `kind` added.
    #[must_use]
    pub const fn with(self, kind: DeclarationKind) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Returns true if no kind is allowed.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the kinds in this set.
    pub fn iter(self) -> impl Iterator<Item = DeclarationKind> {
        [DeclarationKind::Class, DeclarationKind::Function]
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl Default for Targets {
    fn default() -> Self {
        Self::ANY
    }
}

impl From<DeclarationKind> for Targets {
    fn from(kind: DeclarationKind) -> Self {
        Self(kind.bit())
    }
}

impl FromIterator<DeclarationKind> for Targets {
    fn from_iter<I: IntoIterator<Item = DeclarationKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl fmt::Debug for Targets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for Targets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "nothing");
        }
        let names: Vec<String> = self.iter().map(|kind| kind.to_string()).collect();
        write!(f, "{}", names.join(" | "))
    }
}
