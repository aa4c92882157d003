//! Error types for annotate.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::declaration::{DeclarationId, DeclarationKind, Targets};

/// Result type alias for annotate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for annotate operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Fills in the context fields this error does not carry yet.
    ///
    /// Fields set closer to the failure are kept.
    #[must_use]
    pub fn or_context(mut self, fallback: ErrorContext) -> Self {
        let context = match self.context.take() {
            Some(existing) => ErrorContext {
                declaration: existing.declaration.or(fallback.declaration),
                key: existing.key.or(fallback.key),
            },
            None => fallback,
        };
        self.context = Some(context);
        self
    }

    /// Creates a target mismatch error.
    #[must_use]
    pub fn target_mismatch(key: impl Into<String>, kind: DeclarationKind, targets: Targets) -> Self {
        Self::new(ErrorKind::TargetMismatch {
            key: key.into(),
            kind,
            targets,
        })
    }

    /// Creates a repeatable/overwrite conflict error.
    #[must_use]
    pub fn conflict(key: impl Into<String>, existing: Multiplicity, incoming: Multiplicity) -> Self {
        Self::new(ErrorKind::Conflict {
            key: key.into(),
            existing,
            incoming,
        })
    }

    /// Creates a declaration not found error.
    #[must_use]
    pub fn declaration_not_found(id: DeclarationId) -> Self {
        Self::new(ErrorKind::DeclarationNotFound(id))
    }

    /// Creates a stale declaration reference error.
    #[must_use]
    pub fn stale_declaration(id: DeclarationId) -> Self {
        Self::new(ErrorKind::StaleDeclaration(id))
    }

    /// Creates an error for subclassing something that is not a class.
    #[must_use]
    pub fn not_a_class(id: DeclarationId) -> Self {
        Self::new(ErrorKind::NotAClass(id))
    }

    /// Creates an error for removing a class that still has subclasses.
    #[must_use]
    pub fn has_subclasses(id: DeclarationId, count: usize) -> Self {
        Self::new(ErrorKind::HasSubclasses { class: id, count })
    }

    /// Creates an error raised from inside a subclass hook.
    #[must_use]
    pub fn hook(parent: DeclarationId, child: DeclarationId, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Hook {
            parent,
            child,
            message: message.into(),
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Whether an annotation application overwrites or accumulates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Multiplicity {
    /// Last application wins.
    Single,
    /// Applications accumulate into a list.
    Repeatable,
}

impl Multiplicity {
    /// Maps a `repeatable` flag to its multiplicity.
    #[must_use]
    pub const fn from_repeatable(repeatable: bool) -> Self {
        if repeatable {
            Self::Repeatable
        } else {
            Self::Single
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Repeatable => write!(f, "repeatable"),
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Annotation applied to a declaration kind outside its targets.
    #[error("annotation {key:?} cannot target a {kind} (allowed: {targets})")]
    TargetMismatch {
        /// The annotation key.
        key: String,
        /// The kind of the declaration it was applied to.
        kind: DeclarationKind,
        /// The kinds the annotation allows.
        targets: Targets,
    },

    /// A key was applied both as repeatable and as single-valued.
    #[error("annotation {key:?} is already {existing} on this declaration, cannot apply it as {incoming}")]
    Conflict {
        /// The annotation key.
        key: String,
        /// Multiplicity of the stored entry.
        existing: Multiplicity,
        /// Multiplicity of the rejected application.
        incoming: Multiplicity,
    },

    /// Declaration was never allocated or has been removed.
    #[error("declaration not found: {0:?}")]
    DeclarationNotFound(DeclarationId),

    /// Declaration reference is stale (generation mismatch).
    #[error("stale declaration reference: {0:?}")]
    StaleDeclaration(DeclarationId),

    /// Only classes may be subclassed.
    #[error("declaration {0:?} is not a class")]
    NotAClass(DeclarationId),

    /// A class cannot be removed while subclasses refer to it.
    #[error("class {class:?} still has {count} subclass(es)")]
    HasSubclasses {
        /// The class that was to be removed.
        class: DeclarationId,
        /// Number of live subclasses.
        count: usize,
    },

    /// A subclass hook failed.
    #[error("subclass hook failed for {child:?} (parent {parent:?}): {message}")]
    Hook {
        /// The class whose hook ran.
        parent: DeclarationId,
        /// The subclass being defined.
        child: DeclarationId,
        /// Description of the failure.
        message: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the declaration involved.
    pub declaration: Option<String>,
    /// Key of the annotation being applied.
    pub key: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the declaration name.
    #[must_use]
    pub fn with_declaration(mut self, name: impl Into<String>) -> Self {
        self.declaration = Some(name.into());
        self
    }

    /// Sets the annotation key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.declaration, &self.key) {
            (Some(decl), Some(key)) => write!(f, "while applying {key:?} to {decl}"),
            (Some(decl), None) => write!(f, "on {decl}"),
            (None, Some(key)) => write!(f, "while applying {key:?}"),
            (None, None) => Ok(()),
        }
    }
}
