//! Event payloads and the closed set of hand event kinds.
//!
//! Every payload is a plain `Copy` value with read accessors only. Nothing
//! here validates: whatever the event source passes in is what observers
//! read back.

use std::str::FromStr;

use handtrack_id::HandId;
use serde::{Deserialize, Serialize};

use crate::EventError;

// =============================================================================
// Event Type Constants
// =============================================================================

/// All event type names as constants.
pub mod event_types {
    pub const HAND_CREATED: &str = "hand.created";
    pub const HAND_UPDATED: &str = "hand.updated";
    pub const HAND_DESTROYED: &str = "hand.destroyed";
    pub const HAND_TOUCHING_FOV_EDGE: &str = "hand.touching_fov_edge";
}

/// Schema version written into new envelopes.
pub const CURRENT_EVENT_VERSION: i32 = 1;

// =============================================================================
// Geometry
// =============================================================================

/// A point in real-world coordinates as reported by the tracking engine.
///
/// Units and axes are whatever the engine uses (millimetres, camera-centred,
/// for the common depth sensors).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3D {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &Point3D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl From<[f32; 3]> for Point3D {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Point3D> for [f32; 3] {
    fn from(p: Point3D) -> Self {
        [p.x, p.y, p.z]
    }
}

impl std::fmt::Display for Point3D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

/// Which edge of the field of view a hand is touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Illegal,
    Left,
    Right,
    Up,
    Down,
    Forward,
    Backward,
}

impl Direction {
    /// Maps the engine's integer direction code. Unknown codes map to
    /// [`Direction::Illegal`].
    #[must_use]
    pub fn from_native(code: i32) -> Self {
        match code {
            1 => Self::Left,
            2 => Self::Right,
            3 => Self::Up,
            4 => Self::Down,
            5 => Self::Forward,
            6 => Self::Backward,
            _ => Self::Illegal,
        }
    }

    #[must_use]
    pub fn native_value(&self) -> i32 {
        match self {
            Self::Illegal => 0,
            Self::Left => 1,
            Self::Right => 2,
            Self::Up => 3,
            Self::Down => 4,
            Self::Forward => 5,
            Self::Backward => 6,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Illegal => "illegal",
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
            Self::Forward => "forward",
            Self::Backward => "backward",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Event Payloads
// =============================================================================

/// Payload of an event about an active hand: which hand, where it was, and
/// the timestamp of the frame that produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveHandPayload {
    id: HandId,
    position: Point3D,
    time: f32,
}

impl ActiveHandPayload {
    #[must_use]
    pub const fn new(id: HandId, position: Point3D, time: f32) -> Self {
        Self { id, position, time }
    }

    /// Handle of the hand that triggered the event.
    #[must_use]
    pub const fn id(&self) -> HandId {
        self.id
    }

    /// Position of the hand, in real-world coordinates, when the event fired.
    #[must_use]
    pub const fn position(&self) -> Point3D {
        self.position
    }

    /// Timestamp (seconds) of the frame that triggered the event.
    #[must_use]
    pub const fn time(&self) -> f32 {
        self.time
    }
}

/// Payload of an event about a hand that stopped being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InactiveHandPayload {
    id: HandId,
    time: f32,
}

impl InactiveHandPayload {
    #[must_use]
    pub const fn new(id: HandId, time: f32) -> Self {
        Self { id, time }
    }

    #[must_use]
    pub const fn id(&self) -> HandId {
        self.id
    }

    #[must_use]
    pub const fn time(&self) -> f32 {
        self.time
    }
}

/// Payload of an event about a hand touching an edge of the field of view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandDirectionPayload {
    id: HandId,
    position: Point3D,
    time: f32,
    direction: Direction,
}

impl HandDirectionPayload {
    #[must_use]
    pub const fn new(id: HandId, position: Point3D, time: f32, direction: Direction) -> Self {
        Self {
            id,
            position,
            time,
            direction,
        }
    }

    #[must_use]
    pub const fn id(&self) -> HandId {
        self.id
    }

    #[must_use]
    pub const fn position(&self) -> Point3D {
        self.position
    }

    #[must_use]
    pub const fn time(&self) -> f32 {
        self.time
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

// =============================================================================
// Hand Events
// =============================================================================

/// Discriminant of [`HandEvent`], used for filtering and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandEventKind {
    Created,
    Updated,
    Destroyed,
    TouchingFovEdge,
}

impl HandEventKind {
    pub const ALL: [HandEventKind; 4] = [
        Self::Created,
        Self::Updated,
        Self::Destroyed,
        Self::TouchingFovEdge,
    ];

    /// The `event_type` string written into envelopes.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => event_types::HAND_CREATED,
            Self::Updated => event_types::HAND_UPDATED,
            Self::Destroyed => event_types::HAND_DESTROYED,
            Self::TouchingFovEdge => event_types::HAND_TOUCHING_FOV_EDGE,
        }
    }
}

impl std::fmt::Display for HandEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandEventKind {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EventError::UnknownEventType(s.to_string()))
    }
}

/// A hand event as delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum HandEvent {
    /// A hand became active.
    Created(ActiveHandPayload),
    /// An active hand has a new position.
    Updated(ActiveHandPayload),
    /// A hand is no longer tracked.
    Destroyed(InactiveHandPayload),
    /// A hand entered the edge zone of the field of view.
    TouchingFovEdge(HandDirectionPayload),
}

impl HandEvent {
    #[must_use]
    pub const fn kind(&self) -> HandEventKind {
        match self {
            Self::Created(_) => HandEventKind::Created,
            Self::Updated(_) => HandEventKind::Updated,
            Self::Destroyed(_) => HandEventKind::Destroyed,
            Self::TouchingFovEdge(_) => HandEventKind::TouchingFovEdge,
        }
    }

    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        self.kind().as_str()
    }

    #[must_use]
    pub const fn hand_id(&self) -> HandId {
        match self {
            Self::Created(p) | Self::Updated(p) => p.id(),
            Self::Destroyed(p) => p.id(),
            Self::TouchingFovEdge(p) => p.id(),
        }
    }

    #[must_use]
    pub const fn time(&self) -> f32 {
        match self {
            Self::Created(p) | Self::Updated(p) => p.time(),
            Self::Destroyed(p) => p.time(),
            Self::TouchingFovEdge(p) => p.time(),
        }
    }

    /// Hand position, if the event carries one.
    #[must_use]
    pub const fn position(&self) -> Option<Point3D> {
        match self {
            Self::Created(p) | Self::Updated(p) => Some(p.position()),
            Self::Destroyed(_) => None,
            Self::TouchingFovEdge(p) => Some(p.position()),
        }
    }

    /// Serializes only the variant's payload, as it appears in an envelope.
    pub fn payload_value(&self) -> Result<serde_json::Value, EventError> {
        let value = match self {
            Self::Created(p) | Self::Updated(p) => serde_json::to_value(p)?,
            Self::Destroyed(p) => serde_json::to_value(p)?,
            Self::TouchingFovEdge(p) => serde_json::to_value(p)?,
        };
        Ok(value)
    }

    /// Rebuilds an event from an envelope's `event_type`, `event_version`
    /// and payload.
    pub fn decode(
        event_type: &str,
        version: i32,
        payload: serde_json::Value,
    ) -> Result<Self, EventError> {
        let kind: HandEventKind = event_type.parse()?;
        if version != CURRENT_EVENT_VERSION {
            return Err(EventError::UnsupportedVersion {
                event_type: event_type.to_string(),
                version,
            });
        }

        let invalid = |err: serde_json::Error| EventError::InvalidPayload {
            event_type: event_type.to_string(),
            message: err.to_string(),
        };

        let event = match kind {
            HandEventKind::Created => {
                Self::Created(serde_json::from_value(payload).map_err(invalid)?)
            }
            HandEventKind::Updated => {
                Self::Updated(serde_json::from_value(payload).map_err(invalid)?)
            }
            HandEventKind::Destroyed => {
                Self::Destroyed(serde_json::from_value(payload).map_err(invalid)?)
            }
            HandEventKind::TouchingFovEdge => {
                Self::TouchingFovEdge(serde_json::from_value(payload).map_err(invalid)?)
            }
        };
        Ok(event)
    }
}

// =============================================================================
// Tests
// =============================================================================
