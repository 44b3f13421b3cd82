//! Event filtering for observers and subscriptions.

use handtrack_events::{EventEnvelope, HandEvent, HandEventKind, HandId};

/// Selects which events an observer or subscription receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Accepted kinds. Empty means every kind.
    kinds: Vec<HandEventKind>,
    /// Only events about this hand, if set.
    hand: Option<HandId>,
}

impl EventFilter {
    /// Accepts every event.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn kinds(kinds: impl IntoIterator<Item = HandEventKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
            hand: None,
        }
    }

    /// Restricts the filter to events about one hand.
    #[must_use]
    pub fn for_hand(mut self, hand: HandId) -> Self {
        self.hand = Some(hand);
        self
    }

    #[must_use]
    pub fn matches(&self, envelope: &EventEnvelope<HandEvent>) -> bool {
        let event = &envelope.payload;
        let kind_ok = self.kinds.is_empty() || self.kinds.contains(&event.kind());
        let hand_ok = self.hand.is_none_or(|hand| hand == event.hand_id());
        kind_ok && hand_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handtrack_events::{ActiveHandPayload, EventSeq, InactiveHandPayload, Point3D, SessionId};

    fn wrap(event: HandEvent) -> EventEnvelope<HandEvent> {
        EventEnvelope::for_event(EventSeq::FIRST, SessionId::new(), event)
    }

    #[test]
    fn test_all_matches_everything() {
        let created = wrap(HandEvent::Created(ActiveHandPayload::new(
            HandId::new(1),
            Point3D::ORIGIN,
            0.0,
        )));
        assert!(EventFilter::all().matches(&created));
    }

    #[test]
    fn test_kind_filter() {
        let filter = EventFilter::kinds([HandEventKind::Destroyed]);
        let destroyed = wrap(HandEvent::Destroyed(InactiveHandPayload::new(HandId::new(1), 1.0)));
        let updated = wrap(HandEvent::Updated(ActiveHandPayload::new(
            HandId::new(1),
            Point3D::ORIGIN,
            1.0,
        )));
        assert!(filter.matches(&destroyed));
        assert!(!filter.matches(&updated));
    }

    #[test]
    fn test_hand_filter() {
        let filter = EventFilter::all().for_hand(HandId::new(2));
        let other = wrap(HandEvent::Destroyed(InactiveHandPayload::new(HandId::new(1), 1.0)));
        let mine = wrap(HandEvent::Destroyed(InactiveHandPayload::new(HandId::new(2), 1.0)));
        assert!(!filter.matches(&other));
        assert!(filter.matches(&mine));
    }
}
