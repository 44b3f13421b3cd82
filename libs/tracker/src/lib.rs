//! # handtrack-tracker
//!
//! The producing side of hand events.
//!
//! [`HandTracker`] is fed hand positions that an upstream tracking engine
//! has already computed. It owns the set of active hands, assigns their
//! handles, smooths their positions, and raises a [`HandEvent`] through an
//! [`EventSink`] for every transition.
//!
//! ## Invariants
//!
//! - A handle is unique among the hands active at one moment; released
//!   handles are reused, lowest first
//! - No `Updated`, `Destroyed` or `TouchingFovEdge` event is raised for a
//!   handle that is not active
//! - Event sequence numbers increase by one per raised event
//! - Frame times never go backwards for a given hand
//!
//! [`HandEvent`]: handtrack_events::HandEvent
//! [`EventSink`]: handtrack_dispatch::EventSink

mod command;
mod config;
mod error;
mod tracker;

pub use command::{CommandOutcome, TrackerCommand};
pub use config::{FieldOfView, TrackerConfig};
pub use error::TrackerError;
pub use tracker::HandTracker;
