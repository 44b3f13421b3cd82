//! Queued, multi-consumer delivery over a broadcast channel.

use std::sync::atomic::{AtomicU64, Ordering};

use handtrack_events::{EventEnvelope, HandEvent};
use tokio::sync::broadcast;
use tracing::debug;

use crate::{DispatchError, EventFilter, EventSink, DEFAULT_QUEUE_CAPACITY};

/// Queues events for any number of [`Subscription`]s.
///
/// Delivery never blocks the event source. A subscription that falls more
/// than `capacity` events behind loses the oldest ones.
pub struct QueuedDispatcher {
    sender: broadcast::Sender<EventEnvelope<HandEvent>>,
    events_delivered: AtomicU64,
    capacity: usize,
}

impl QueuedDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            events_delivered: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribes to events matching `filter`. Only events delivered after
    /// this call are seen.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(?filter, "New subscription created");
        Subscription {
            receiver: self.sender.subscribe(),
            filter,
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total events handed to the channel, with or without subscribers.
    #[must_use]
    pub fn events_delivered(&self) -> u64 {
        self.events_delivered.load(Ordering::Relaxed)
    }
}

impl Default for QueuedDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for QueuedDispatcher {
    fn deliver(&self, envelope: &EventEnvelope<HandEvent>) -> usize {
        self.events_delivered.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(envelope.clone()) {
            Ok(receivers) => {
                debug!(
                    event_type = %envelope.event_type,
                    seq = %envelope.seq,
                    receivers,
                    "Event queued"
                );
                receivers
            }
            Err(_) => {
                debug!(
                    event_type = %envelope.event_type,
                    seq = %envelope.seq,
                    "Event dropped (no subscribers)"
                );
                0
            }
        }
    }
}

/// Receiving end of a [`QueuedDispatcher`].
pub struct Subscription {
    receiver: broadcast::Receiver<EventEnvelope<HandEvent>>,
    filter: EventFilter,
}

impl Subscription {
    /// Waits for the next matching event. Returns `None` once the
    /// dispatcher is dropped and the queue is drained.
    pub async fn recv(&mut self) -> Option<EventEnvelope<HandEvent>> {
        loop {
            let envelope = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some events dropped");
                    continue;
                }
            };

            if self.filter.matches(&envelope) {
                return Some(envelope);
            }
        }
    }

    /// Returns the next matching event if one is queued.
    pub fn try_recv(&mut self) -> Result<Option<EventEnvelope<HandEvent>>, DispatchError> {
        loop {
            let envelope = match self.receiver.try_recv() {
                Ok(e) => e,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => return Err(DispatchError::Closed),
                Err(broadcast::error::TryRecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some events dropped");
                    continue;
                }
            };

            if self.filter.matches(&envelope) {
                return Ok(Some(envelope));
            }
        }
    }

    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}
