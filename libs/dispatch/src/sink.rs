//! The delivery seam between an event source and its observers.

use std::sync::Arc;

use handtrack_events::{EventEnvelope, HandEvent};

/// Anything that can take delivery of hand events.
pub trait EventSink: Send + Sync {
    /// Delivers one event.
    ///
    /// Returns the number of receivers the event reached.
    fn deliver(&self, envelope: &EventEnvelope<HandEvent>) -> usize;
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn deliver(&self, envelope: &EventEnvelope<HandEvent>) -> usize {
        (**self).deliver(envelope)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn deliver(&self, envelope: &EventEnvelope<HandEvent>) -> usize {
        (**self).deliver(envelope)
    }
}

/// Forwards every event to each inner sink in order.
#[derive(Default)]
pub struct FanOut {
    sinks: Vec<Box<dyn EventSink>>,
}

impl FanOut {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, sink: impl EventSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for FanOut {
    fn deliver(&self, envelope: &EventEnvelope<HandEvent>) -> usize {
        self.sinks.iter().map(|sink| sink.deliver(envelope)).sum()
    }
}
