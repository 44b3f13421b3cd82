//! # handtrack-events
//!
//! Event payloads raised by a hand tracker and the envelope they travel in.
//!
//! ## Design Principles
//!
//! - Payloads are immutable values: they are built once by the event source
//!   and only read by observers
//! - Payloads never validate their inputs; the event source owns every
//!   invariant about which hands are active
//! - The set of event kinds is closed ([`HandEvent`]), so observers match
//!   exhaustively instead of downcasting
//! - Envelopes are versioned for schema evolution
//!
//! ## Event Kinds
//!
//! - `hand.created`: a hand became active ([`ActiveHandPayload`])
//! - `hand.updated`: an active hand moved ([`ActiveHandPayload`])
//! - `hand.destroyed`: a hand is no longer tracked ([`InactiveHandPayload`])
//! - `hand.touching_fov_edge`: a hand reached the edge of the field of view
//!   ([`HandDirectionPayload`])

mod envelope;
mod error;
mod types;

pub use envelope::*;
pub use error::EventError;
pub use types::*;

pub use handtrack_id::{EventSeq, HandId, SessionId};
