//! Error types for event handling.

use thiserror::Error;

/// Errors that can occur when encoding or decoding events.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EventError {
    /// The event type is unknown.
    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    /// The event version is not supported.
    #[error("unsupported event version: {event_type} v{version}")]
    UnsupportedVersion { event_type: String, version: i32 },

    /// The payload does not match the shape of its event type.
    #[error("invalid {event_type} payload: {message}")]
    InvalidPayload { event_type: String, message: String },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Sequence numbers went backwards.
    #[error("invalid event sequence: expected at least {expected}, got {actual}")]
    InvalidSequence { expected: u64, actual: u64 },

    /// An envelope was built without a required field.
    #[error("missing envelope field: {0}")]
    MissingField(&'static str),
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        EventError::Serialization(err.to_string())
    }
}
