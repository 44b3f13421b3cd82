//! Parse failures for prefixed IDs.

use thiserror::Error;

/// Why a string is not a valid `{prefix}_{ulid}` ID.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("empty string is not an ID")]
    Empty,

    /// The part before `_` names a different kind of ID.
    #[error("expected a '{expected}' ID, found prefix '{actual}'")]
    InvalidPrefix {
        expected: &'static str,
        actual: String,
    },

    #[error("no '_' between prefix and ULID")]
    MissingSeparator,

    /// Prefix matched, the rest is not a 26-character Crockford ULID.
    #[error("bad ULID after '{prefix}_': {reason}")]
    InvalidUlid { prefix: &'static str, reason: String },
}

impl IdError {
    pub fn is_empty(&self) -> bool {
        matches!(self, IdError::Empty)
    }

    /// The prefix that was found instead of the expected one.
    pub fn found_prefix(&self) -> Option<&str> {
        match self {
            IdError::InvalidPrefix { actual, .. } => Some(actual),
            _ => None,
        }
    }
}
