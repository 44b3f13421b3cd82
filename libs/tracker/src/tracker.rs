//! The hand tracker session.

use std::collections::BTreeMap;

use handtrack_dispatch::EventSink;
use handtrack_events::{
    ActiveHandPayload, Direction, EventEnvelope, HandDirectionPayload, HandEvent,
    InactiveHandPayload, Point3D,
};
use handtrack_id::{EventSeq, HandId, SessionId};
use tracing::{debug, info, warn};

use crate::{TrackerConfig, TrackerError};

#[derive(Debug, Clone, Copy)]
struct TrackedHand {
    position: Point3D,
    last_time: f32,
    edge: Option<Direction>,
}

/// Owns the active hands of one session and raises their events.
pub struct HandTracker<S> {
    config: TrackerConfig,
    sink: S,
    session_id: SessionId,
    next_seq: EventSeq,
    hands: BTreeMap<HandId, TrackedHand>,
}

impl<S: EventSink> HandTracker<S> {
    /// Starts a new session delivering to `sink`.
    pub fn new(config: TrackerConfig, sink: S) -> Result<Self, TrackerError> {
        config.validate()?;
        let session_id = SessionId::new();
        info!(
            session_id = %session_id,
            max_hands = config.max_hands,
            "Tracker session started"
        );
        Ok(Self {
            config,
            sink,
            session_id,
            next_seq: EventSeq::FIRST,
            hands: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[must_use]
    pub fn smoothing(&self) -> f32 {
        self.config.smoothing
    }

    /// Changes the smoothing factor for subsequent updates.
    pub fn set_smoothing(&mut self, factor: f32) -> Result<(), TrackerError> {
        if !(0.0..=1.0).contains(&factor) {
            warn!(factor, "Rejected smoothing factor");
            return Err(TrackerError::InvalidSmoothing(factor));
        }
        self.config.smoothing = factor;
        Ok(())
    }

    /// Active handles in ascending order.
    #[must_use]
    pub fn active_hands(&self) -> Vec<HandId> {
        self.hands.keys().copied().collect()
    }

    #[must_use]
    pub fn is_active(&self, id: HandId) -> bool {
        self.hands.contains_key(&id)
    }

    /// Last reported (smoothed) position of an active hand.
    #[must_use]
    pub fn hand_position(&self, id: HandId) -> Option<Point3D> {
        self.hands.get(&id).map(|hand| hand.position)
    }

    /// Number of events raised so far in this session.
    #[must_use]
    pub fn events_emitted(&self) -> u64 {
        self.next_seq.value() - EventSeq::FIRST.value()
    }

    /// Begins tracking a hand first seen at `position`.
    pub fn start_tracking(
        &mut self,
        position: Point3D,
        time: f32,
    ) -> Result<HandId, TrackerError> {
        if self.hands.len() >= self.config.max_hands {
            warn!(max = self.config.max_hands, "Rejected new hand, tracker full");
            return Err(TrackerError::TooManyHands {
                max: self.config.max_hands,
            });
        }

        let id = self.free_id();
        self.hands.insert(
            id,
            TrackedHand {
                position,
                last_time: time,
                edge: None,
            },
        );
        info!(hand_id = %id, %position, time, "Hand created");

        self.emit(HandEvent::Created(ActiveHandPayload::new(id, position, time)));
        self.check_edge(id, position, time);
        Ok(id)
    }

    /// Reports a new raw position for an active hand. Returns the payload
    /// raised, whose position is the smoothed one.
    pub fn update(
        &mut self,
        id: HandId,
        position: Point3D,
        time: f32,
    ) -> Result<ActiveHandPayload, TrackerError> {
        let smoothing = self.config.smoothing;
        let Some(hand) = self.hands.get_mut(&id) else {
            warn!(hand_id = %id, "Update for unknown hand");
            return Err(TrackerError::UnknownHand(id));
        };

        // NaN would compare as neither older nor newer.
        if time.is_nan() || time < hand.last_time {
            warn!(hand_id = %id, last = hand.last_time, time, "Stale frame");
            return Err(TrackerError::StaleFrame {
                id,
                last: hand.last_time,
                time,
            });
        }

        let smoothed = smooth(hand.position, position, smoothing);
        hand.position = smoothed;
        hand.last_time = time;
        debug!(hand_id = %id, position = %smoothed, time, "Hand updated");

        let payload = ActiveHandPayload::new(id, smoothed, time);
        self.emit(HandEvent::Updated(payload));
        self.check_edge(id, smoothed, time);
        Ok(payload)
    }

    /// Stops tracking a hand and releases its handle.
    pub fn stop_tracking(
        &mut self,
        id: HandId,
        time: f32,
    ) -> Result<InactiveHandPayload, TrackerError> {
        if self.hands.remove(&id).is_none() {
            warn!(hand_id = %id, "Stop for unknown hand");
            return Err(TrackerError::UnknownHand(id));
        }
        info!(hand_id = %id, time, "Hand destroyed");

        let payload = InactiveHandPayload::new(id, time);
        self.emit(HandEvent::Destroyed(payload));
        Ok(payload)
    }

    /// Stops every active hand, lowest handle first. Returns how many.
    pub fn stop_tracking_all(&mut self, time: f32) -> usize {
        let hands = std::mem::take(&mut self.hands);
        for id in hands.keys().copied() {
            info!(hand_id = %id, time, "Hand destroyed");
            self.emit(HandEvent::Destroyed(InactiveHandPayload::new(id, time)));
        }
        hands.len()
    }

    fn free_id(&self) -> HandId {
        let mut candidate = HandId::FIRST.value();
        for id in self.hands.keys() {
            if id.value() != candidate {
                break;
            }
            candidate += 1;
        }
        HandId::new(candidate)
    }

    fn check_edge(&mut self, id: HandId, position: Point3D, time: f32) {
        let edge = self
            .config
            .field_of_view
            .touching_edge(position, self.config.edge_margin);

        let Some(hand) = self.hands.get_mut(&id) else {
            return;
        };
        let previous = std::mem::replace(&mut hand.edge, edge);

        if let Some(direction) = edge {
            if previous != Some(direction) {
                debug!(hand_id = %id, %direction, "Hand touching field of view edge");
                self.emit(HandEvent::TouchingFovEdge(HandDirectionPayload::new(
                    id, position, time, direction,
                )));
            }
        }
    }

    fn emit(&mut self, event: HandEvent) -> usize {
        let envelope = EventEnvelope::for_event(self.next_seq, self.session_id, event);
        self.next_seq = self.next_seq.next();
        self.sink.deliver(&envelope)
    }
}

/// `prev * factor + raw * (1 - factor)` per axis. The end points return
/// one side untouched so a non-finite coordinate on the other cannot leak in.
fn smooth(prev: Point3D, raw: Point3D, factor: f32) -> Point3D {
    if factor == 0.0 {
        return raw;
    }
    if factor == 1.0 {
        return prev;
    }
    let mix = |p: f32, r: f32| p * factor + r * (1.0 - factor);
    Point3D::new(mix(prev.x, raw.x), mix(prev.y, raw.y), mix(prev.z, raw.z))
}
