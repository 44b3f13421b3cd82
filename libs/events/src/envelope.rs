//! Event envelope - the common wrapper for every event a session emits.

use chrono::{DateTime, Utc};
use handtrack_id::{EventSeq, SessionId};
use serde::{Deserialize, Serialize};

use crate::{EventError, HandEvent, CURRENT_EVENT_VERSION};

/// Session metadata wrapped around an event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope<P> {
    /// Monotonic position within the session.
    pub seq: EventSeq,

    /// Wall-clock time the event was raised. The engine's frame time lives
    /// in the payload.
    pub occurred_at: DateTime<Utc>,

    /// Tracker session that raised the event.
    pub session_id: SessionId,

    /// The event type (e.g., "hand.created").
    pub event_type: String,

    /// Schema version for this event type.
    pub event_version: i32,

    /// Event-specific payload.
    pub payload: P,
}

impl<P> EventEnvelope<P> {
    pub fn builder() -> EventEnvelopeBuilder<P> {
        EventEnvelopeBuilder::new()
    }
}

impl EventEnvelope<HandEvent> {
    /// Wraps a hand event, deriving `event_type` and version from it.
    #[must_use]
    pub fn for_event(seq: EventSeq, session_id: SessionId, event: HandEvent) -> Self {
        Self {
            seq,
            occurred_at: Utc::now(),
            session_id,
            event_type: event.event_type().to_string(),
            event_version: CURRENT_EVENT_VERSION,
            payload: event,
        }
    }

    /// Encodes the envelope with the bare variant payload under `payload`.
    /// Fails if `event_type` does not name the payload's variant.
    pub fn to_json(&self) -> Result<String, EventError> {
        if self.event_type != self.payload.event_type() {
            return Err(EventError::InvalidPayload {
                event_type: self.event_type.clone(),
                message: format!("payload is a {} event", self.payload.event_type()),
            });
        }
        let wire = EventEnvelope {
            seq: self.seq,
            occurred_at: self.occurred_at,
            session_id: self.session_id,
            event_type: self.event_type.clone(),
            event_version: self.event_version,
            payload: self.payload.payload_value()?,
        };
        Ok(serde_json::to_string(&wire)?)
    }

    /// Decodes an envelope written by [`EventEnvelope::to_json`].
    pub fn from_json(s: &str) -> Result<Self, EventError> {
        let wire: EventEnvelope<serde_json::Value> = serde_json::from_str(s)?;
        let payload = HandEvent::decode(&wire.event_type, wire.event_version, wire.payload)?;
        Ok(EventEnvelope {
            seq: wire.seq,
            occurred_at: wire.occurred_at,
            session_id: wire.session_id,
            event_type: wire.event_type,
            event_version: wire.event_version,
            payload,
        })
    }
}

/// Checks that `next` follows `prev` within a session.
pub fn check_sequence(prev: EventSeq, next: EventSeq) -> Result<(), EventError> {
    if next <= prev {
        return Err(EventError::InvalidSequence {
            expected: prev.next().value(),
            actual: next.value(),
        });
    }
    Ok(())
}

/// Builder for constructing event envelopes.
#[derive(Debug)]
pub struct EventEnvelopeBuilder<P> {
    seq: Option<EventSeq>,
    occurred_at: Option<DateTime<Utc>>,
    session_id: Option<SessionId>,
    event_type: Option<String>,
    event_version: i32,
    payload: Option<P>,
}

impl<P> EventEnvelopeBuilder<P> {
    pub fn new() -> Self {
        Self {
            seq: None,
            occurred_at: None,
            session_id: None,
            event_type: None,
            event_version: CURRENT_EVENT_VERSION,
            payload: None,
        }
    }

    pub fn seq(mut self, seq: EventSeq) -> Self {
        self.seq = Some(seq);
        self
    }

    pub fn occurred_at(mut self, ts: DateTime<Utc>) -> Self {
        self.occurred_at = Some(ts);
        self
    }

    pub fn session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn event_version(mut self, version: i32) -> Self {
        self.event_version = version;
        self
    }

    pub fn payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Builds the envelope. `occurred_at` defaults to now.
    pub fn build(self) -> Result<EventEnvelope<P>, EventError> {
        Ok(EventEnvelope {
            seq: self.seq.ok_or(EventError::MissingField("seq"))?,
            occurred_at: self.occurred_at.unwrap_or_else(Utc::now),
            session_id: self
                .session_id
                .ok_or(EventError::MissingField("session_id"))?,
            event_type: self
                .event_type
                .ok_or(EventError::MissingField("event_type"))?,
            event_version: self.event_version,
            payload: self.payload.ok_or(EventError::MissingField("payload"))?,
        })
    }
}

impl<P> Default for EventEnvelopeBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActiveHandPayload, Direction, HandDirectionPayload, HandId, Point3D};

    fn created(id: i32) -> HandEvent {
        HandEvent::Created(ActiveHandPayload::new(
            HandId::new(id),
            Point3D::new(1.0, 2.0, 3.0),
            12.5,
        ))
    }

    #[test]
    fn test_for_event_fills_type_and_version() {
        let envelope = EventEnvelope::for_event(EventSeq::FIRST, SessionId::new(), created(7));
        assert_eq!(envelope.event_type, "hand.created");
        assert_eq!(envelope.event_version, CURRENT_EVENT_VERSION);
        assert_eq!(envelope.payload.hand_id(), HandId::new(7));
    }

    #[test]
    fn test_builder_requires_fields() {
        let err = EventEnvelope::<HandEvent>::builder()
            .seq(EventSeq::FIRST)
            .payload(created(1))
            .build()
            .unwrap_err();
        assert_eq!(err, EventError::MissingField("session_id"));
    }

    #[test]
    fn test_builder_defaults_version() {
        let envelope = EventEnvelope::<serde_json::Value>::builder()
            .seq(EventSeq::new(3))
            .session_id(SessionId::new())
            .event_type("hand.updated")
            .payload(serde_json::json!({}))
            .build()
            .unwrap();
        assert_eq!(envelope.event_version, 1);
        assert_eq!(envelope.seq.value(), 3);
    }

    #[test]
    fn test_wire_form_carries_bare_payload() {
        let event = HandEvent::TouchingFovEdge(HandDirectionPayload::new(
            HandId::new(2),
            Point3D::new(-300.0, 0.0, 800.0),
            3.5,
            Direction::Left,
        ));
        let envelope = EventEnvelope::for_event(EventSeq::new(9), SessionId::new(), event);
        let json = envelope.to_json().unwrap();

        let raw: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(raw["event_type"], "hand.touching_fov_edge");
        assert_eq!(raw["payload"]["direction"], "left");
        assert!(raw["payload"].get("kind").is_none());

        let decoded = EventEnvelope::from_json(&json).unwrap();
        assert_eq!(decoded, envelope);
    }

    #[test]
    fn test_from_json_rejects_unknown_type() {
        let envelope = EventEnvelope::for_event(EventSeq::FIRST, SessionId::new(), created(1));
        let mut raw: serde_json::Value =
            serde_json::from_str(&envelope.to_json().unwrap()).unwrap();
        raw["event_type"] = "hand.waved".into();
        let err = EventEnvelope::from_json(&raw.to_string()).unwrap_err();
        assert_eq!(err, EventError::UnknownEventType("hand.waved".to_string()));
    }

    #[test]
    fn test_to_json_rejects_mismatched_type() {
        let mut envelope = EventEnvelope::for_event(EventSeq::FIRST, SessionId::new(), created(1));
        envelope.event_type = "hand.updated".to_string();
        let err = envelope.to_json().unwrap_err();
        assert_eq!(
            err,
            EventError::InvalidPayload {
                event_type: "hand.updated".to_string(),
                message: "payload is a hand.created event".to_string(),
            }
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = EventEnvelope::from_json("{not json").unwrap_err();
        assert!(matches!(err, EventError::Serialization(_)));
    }

    #[test]
    fn test_check_sequence() {
        assert!(check_sequence(EventSeq::FIRST, EventSeq::new(2)).is_ok());
        let err = check_sequence(EventSeq::new(5), EventSeq::new(5)).unwrap_err();
        assert_eq!(
            err,
            EventError::InvalidSequence {
                expected: 6,
                actual: 5
            }
        );
    }
}
