//! Synchronous observer registry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use handtrack_events::{EventEnvelope, HandEvent};
use tracing::{debug, warn};

use crate::{EventFilter, EventSink};

/// Callback interface for hand events.
pub trait HandEventObserver: Send + Sync {
    fn on_event(&self, envelope: &EventEnvelope<HandEvent>);
}

impl<F> HandEventObserver for F
where
    F: Fn(&EventEnvelope<HandEvent>) + Send + Sync,
{
    fn on_event(&self, envelope: &EventEnvelope<HandEvent>) {
        self(envelope)
    }
}

/// Handle returned by [`Observable::add_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct Registration {
    id: ObserverId,
    filter: EventFilter,
    observer: Arc<dyn HandEventObserver>,
}

/// Calls registered observers in registration order on the delivering
/// thread.
///
/// Delivery works on a snapshot of the registry, so observers may add or
/// remove observers from inside a callback; the change applies from the
/// next event.
#[derive(Default)]
pub struct Observable {
    observers: RwLock<Vec<Registration>>,
    next_id: AtomicU64,
}

impl Observable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer for every event.
    pub fn add_observer(&self, observer: impl HandEventObserver + 'static) -> ObserverId {
        self.add_filtered_observer(EventFilter::all(), observer)
    }

    pub fn add_filtered_observer(
        &self,
        filter: EventFilter,
        observer: impl HandEventObserver + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let registration = Registration {
            id,
            filter,
            observer: Arc::new(observer),
        };
        match self.observers.write() {
            Ok(mut observers) => observers.push(registration),
            Err(poisoned) => poisoned.into_inner().push(registration),
        }
        debug!(observer_id = id.0, "Observer registered");
        id
    }

    /// Unregisters an observer. Returns false if it was not registered.
    pub fn remove_observer(&self, id: ObserverId) -> bool {
        let mut observers = match self.observers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = observers.len();
        observers.retain(|r| r.id != id);
        let removed = observers.len() != before;
        if removed {
            debug!(observer_id = id.0, "Observer removed");
        }
        removed
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        match self.observers.read() {
            Ok(observers) => observers.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    fn snapshot(&self, envelope: &EventEnvelope<HandEvent>) -> Vec<Arc<dyn HandEventObserver>> {
        let observers = match self.observers.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Observer registry lock poisoned, continuing");
                poisoned.into_inner()
            }
        };
        observers
            .iter()
            .filter(|r| r.filter.matches(envelope))
            .map(|r| r.observer.clone())
            .collect()
    }
}

impl EventSink for Observable {
    fn deliver(&self, envelope: &EventEnvelope<HandEvent>) -> usize {
        let targets = self.snapshot(envelope);
        for observer in &targets {
            observer.on_event(envelope);
        }
        debug!(
            event_type = %envelope.event_type,
            seq = %envelope.seq,
            receivers = targets.len(),
            "Event delivered to observers"
        );
        targets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handtrack_events::{
        ActiveHandPayload, EventSeq, HandEventKind, HandId, InactiveHandPayload, Point3D,
        SessionId,
    };
    use std::sync::Mutex;

    fn created(seq: u64) -> EventEnvelope<HandEvent> {
        EventEnvelope::for_event(
            EventSeq::new(seq),
            SessionId::new(),
            HandEvent::Created(ActiveHandPayload::new(
                HandId::new(7),
                Point3D::new(1.0, 2.0, 3.0),
                12.5,
            )),
        )
    }

    #[test]
    fn test_observers_called_in_registration_order() {
        let observable = Observable::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second"] {
            let log = log.clone();
            observable.add_observer(move |_: &EventEnvelope<HandEvent>| {
                log.lock().unwrap().push(name);
            });
        }

        assert_eq!(observable.deliver(&created(1)), 2);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_observer_reads_payload() {
        let observable = Observable::new();
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        observable.add_observer(move |envelope: &EventEnvelope<HandEvent>| {
            if let HandEvent::Created(payload) = envelope.payload {
                *sink.lock().unwrap() = Some(payload);
            }
        });

        observable.deliver(&created(1));
        let payload = seen.lock().unwrap().unwrap();
        assert_eq!(payload.id(), HandId::new(7));
        assert_eq!(payload.position(), Point3D::new(1.0, 2.0, 3.0));
        assert_eq!(payload.time(), 12.5);
    }

    #[test]
    fn test_remove_observer() {
        let observable = Observable::new();
        let id = observable.add_observer(|_: &EventEnvelope<HandEvent>| {});
        assert_eq!(observable.observer_count(), 1);
        assert!(observable.remove_observer(id));
        assert!(!observable.remove_observer(id));
        assert_eq!(observable.deliver(&created(1)), 0);
    }

    #[test]
    fn test_filtered_observer_skips_other_kinds() {
        let observable = Observable::new();
        let count = Arc::new(AtomicU64::new(0));
        let counter = count.clone();
        observable.add_filtered_observer(
            EventFilter::kinds([HandEventKind::Destroyed]),
            move |_: &EventEnvelope<HandEvent>| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );

        assert_eq!(observable.deliver(&created(1)), 0);
        let destroyed = EventEnvelope::for_event(
            EventSeq::new(2),
            SessionId::new(),
            HandEvent::Destroyed(InactiveHandPayload::new(HandId::new(7), 13.0)),
        );
        assert_eq!(observable.deliver(&destroyed), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_observer_can_unregister_itself() {
        let observable = Arc::new(Observable::new());
        let slot: Arc<Mutex<Option<ObserverId>>> = Arc::new(Mutex::new(None));
        let calls = Arc::new(AtomicU64::new(0));

        let id = {
            let registry = observable.clone();
            let slot = slot.clone();
            let calls = calls.clone();
            observable.add_observer(move |_: &EventEnvelope<HandEvent>| {
                calls.fetch_add(1, Ordering::SeqCst);
                if let Some(id) = *slot.lock().unwrap() {
                    registry.remove_observer(id);
                }
            })
        };
        *slot.lock().unwrap() = Some(id);

        observable.deliver(&created(1));
        observable.deliver(&created(2));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(observable.observer_count(), 0);
    }
}
