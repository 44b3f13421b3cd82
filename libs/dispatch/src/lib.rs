//! # handtrack-dispatch
//!
//! Delivery of hand events from an event source to observers.
//!
//! The event source only sees [`EventSink`]. Which delivery model sits
//! behind it is up to the application:
//!
//! - [`Observable`]: observers are called synchronously, in registration
//!   order, on the thread that raised the event
//! - [`QueuedDispatcher`]: events are queued on a broadcast channel and each
//!   [`Subscription`] drains them on its own task
//! - [`FanOut`]: forwards every event to several sinks

mod error;
mod filter;
mod observable;
mod queued;
mod sink;

pub use error::DispatchError;
pub use filter::EventFilter;
pub use observable::{HandEventObserver, Observable, ObserverId};
pub use queued::{QueuedDispatcher, Subscription};
pub use sink::{EventSink, FanOut};

/// Default capacity of the queued dispatcher's channel.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;
