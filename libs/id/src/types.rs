//! Identifier definitions.

use serde::{Deserialize, Serialize};

use crate::define_id;

// =============================================================================
// Hands
// =============================================================================

/// Integer handle of a tracked hand.
///
/// Any `i32` is accepted. Negative values show up as sentinels in some
/// engines and are carried through untouched.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct HandId(i32);

impl HandId {
    /// The first handle a tracker hands out.
    pub const FIRST: Self = Self(1);

    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for HandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for HandId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<HandId> for i32 {
    fn from(id: HandId) -> Self {
        id.0
    }
}

// =============================================================================
// Sessions
// =============================================================================

define_id!(
    /// Names one tracker session; every event envelope carries it.
    SessionId,
    "sess"
);

// =============================================================================
// Event Sequence Number
// =============================================================================

/// Position of an event within its session, starting at [`EventSeq::FIRST`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventSeq(u64);

impl EventSeq {
    pub const FIRST: Self = Self(1);

    #[must_use]
    pub const fn new(seq: u64) -> Self {
        Self(seq)
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Returns the sequence number that follows this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for EventSeq {
    fn default() -> Self {
        Self::FIRST
    }
}

impl std::fmt::Display for EventSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================
