//! Configuration for annotation resolution.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What happens when a key is applied as repeatable on a declaration where it
/// is stored as single-valued, or the other way around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConflictPolicy {
    /// Fail with [`ErrorKind::Conflict`](annotate_foundation::ErrorKind::Conflict)
    /// and leave the mapping unchanged.
    #[default]
    Reject,
    /// Replace the stored entry: a single-valued application overwrites, a
    /// repeatable one starts a fresh list.
    Replace,
}

/// Configuration for a [`Registry`](crate::Registry).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Handling of mixed repeatable and single-valued applications.
    pub conflict_policy: ConflictPolicy,
}

impl EngineConfig {
    /// Rejects mixed applications (the default).
    #[must_use]
    pub fn strict() -> Self {
        Self {
            conflict_policy: ConflictPolicy::Reject,
        }
    }

    /// Lets the latest application replace a mismatched entry.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            conflict_policy: ConflictPolicy::Replace,
        }
    }

    /// Builder method to set the conflict policy.
    #[must_use]
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }
}
