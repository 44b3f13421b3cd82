//! Error types for event delivery.

use thiserror::Error;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The dispatcher was dropped; no more events will arrive.
    #[error("dispatcher closed")]
    Closed,
}
