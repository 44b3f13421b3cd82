//! Serializable tracker operations, used to script or replay sessions.

use handtrack_dispatch::EventSink;
use handtrack_events::{ActiveHandPayload, InactiveHandPayload, Point3D};
use handtrack_id::HandId;
use serde::{Deserialize, Serialize};

use crate::{HandTracker, TrackerError};

/// One tracker operation.
///
/// ```json
/// {"op": "start", "position": {"x": 0.0, "y": 0.0, "z": 1500.0}, "time": 0.0}
/// {"op": "update", "id": 1, "position": [10.0, 0.0, 1490.0], "time": 0.033}
/// {"op": "stop", "id": 1, "time": 0.5}
/// {"op": "stop_all", "time": 1.0}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TrackerCommand {
    Start { position: Point3D, time: f32 },
    Update { id: HandId, position: Point3D, time: f32 },
    Stop { id: HandId, time: f32 },
    StopAll { time: f32 },
}

/// What a successfully applied command did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandOutcome {
    Started(HandId),
    Updated(ActiveHandPayload),
    Stopped(InactiveHandPayload),
    StoppedAll(usize),
}

impl<S: EventSink> HandTracker<S> {
    pub fn apply(&mut self, command: &TrackerCommand) -> Result<CommandOutcome, TrackerError> {
        match *command {
            TrackerCommand::Start { position, time } => {
                self.start_tracking(position, time).map(CommandOutcome::Started)
            }
            TrackerCommand::Update { id, position, time } => {
                self.update(id, position, time).map(CommandOutcome::Updated)
            }
            TrackerCommand::Stop { id, time } => {
                self.stop_tracking(id, time).map(CommandOutcome::Stopped)
            }
            TrackerCommand::StopAll { time } => {
                Ok(CommandOutcome::StoppedAll(self.stop_tracking_all(time)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrackerConfig;
    use handtrack_dispatch::Observable;

    #[test]
    fn test_parse_commands() {
        let start: TrackerCommand = serde_json::from_str(
            r#"{"op": "start", "position": {"x": 0.0, "y": 0.0, "z": 1500.0}, "time": 0.0}"#,
        )
        .unwrap();
        assert_eq!(
            start,
            TrackerCommand::Start {
                position: Point3D::new(0.0, 0.0, 1500.0),
                time: 0.0
            }
        );

        let update: TrackerCommand = serde_json::from_str(
            r#"{"op": "update", "id": 1, "position": [10.0, 0.0, 1490.0], "time": 0.5}"#,
        )
        .unwrap();
        assert_eq!(
            update,
            TrackerCommand::Update {
                id: HandId::new(1),
                position: Point3D::new(10.0, 0.0, 1490.0),
                time: 0.5
            }
        );

        let stop_all: TrackerCommand =
            serde_json::from_str(r#"{"op": "stop_all", "time": 1.0}"#).unwrap();
        assert_eq!(stop_all, TrackerCommand::StopAll { time: 1.0 });
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        let result = serde_json::from_str::<TrackerCommand>(r#"{"op": "wave", "time": 1.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_sequence() {
        let mut tracker = HandTracker::new(TrackerConfig::default(), Observable::new()).unwrap();
        let position = Point3D::new(0.0, 0.0, 1500.0);

        let outcome = tracker
            .apply(&TrackerCommand::Start { position, time: 0.0 })
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Started(HandId::FIRST));

        let outcome = tracker
            .apply(&TrackerCommand::Stop {
                id: HandId::FIRST,
                time: 1.0,
            })
            .unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::Stopped(InactiveHandPayload::new(HandId::FIRST, 1.0))
        );

        let err = tracker
            .apply(&TrackerCommand::Stop {
                id: HandId::FIRST,
                time: 2.0,
            })
            .unwrap_err();
        assert!(err.is_unknown_hand());
    }
}
