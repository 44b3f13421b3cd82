//! Tracker errors.

use handtrack_id::HandId;
use thiserror::Error;

/// Errors raised when the tracker rejects an operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackerError {
    /// The handle does not name an active hand.
    #[error("hand {0} is not being tracked")]
    UnknownHand(HandId),

    /// Starting another hand would exceed the configured limit.
    #[error("already tracking the maximum of {max} hands")]
    TooManyHands { max: usize },

    /// Smoothing factors live in `[0, 1]`.
    #[error("smoothing factor must be within [0, 1], got {0}")]
    InvalidSmoothing(f32),

    /// A frame older than the hand's last frame.
    #[error("stale frame for hand {id}: time {time} is before {last}")]
    StaleFrame { id: HandId, last: f32, time: f32 },

    /// The configuration is inconsistent or unparsable.
    #[error("invalid tracker configuration: {0}")]
    InvalidConfig(String),
}

impl TrackerError {
    /// Returns true if the error refers to a handle that is not active.
    pub fn is_unknown_hand(&self) -> bool {
        matches!(self, TrackerError::UnknownHand(_))
    }
}

impl From<toml::de::Error> for TrackerError {
    fn from(err: toml::de::Error) -> Self {
        TrackerError::InvalidConfig(err.to_string())
    }
}
