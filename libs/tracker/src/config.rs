//! Tracker configuration.
//!
//! Defaults, then an optional TOML file, then `HANDTRACK_*` environment
//! variables.

use handtrack_events::{Direction, Point3D};
use serde::{Deserialize, Serialize};

use crate::TrackerError;

/// Axis-aligned box the sensor can see, in engine coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldOfView {
    pub min: Point3D,
    pub max: Point3D,
}

impl Default for FieldOfView {
    fn default() -> Self {
        // Typical depth sensor working volume, millimetres.
        Self {
            min: Point3D::new(-1000.0, -800.0, 400.0),
            max: Point3D::new(1000.0, 800.0, 4000.0),
        }
    }
}

impl FieldOfView {
    /// Returns the edge `position` is touching, if it lies within `margin`
    /// of a face (or outside the box). The closest face wins; ties go to
    /// the earlier of left, right, up, down, forward, backward.
    #[must_use]
    pub fn touching_edge(&self, position: Point3D, margin: f32) -> Option<Direction> {
        let faces = [
            (Direction::Left, position.x - self.min.x),
            (Direction::Right, self.max.x - position.x),
            (Direction::Up, self.max.y - position.y),
            (Direction::Down, position.y - self.min.y),
            (Direction::Forward, position.z - self.min.z),
            (Direction::Backward, self.max.z - position.z),
        ];

        faces
            .into_iter()
            .filter(|(_, distance)| *distance <= margin)
            .fold(None, |best: Option<(Direction, f32)>, (dir, distance)| match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((dir, distance)),
            })
            .map(|(dir, _)| dir)
    }
}

/// Tracker settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Exponential smoothing factor, `0.0` (raw positions) to `1.0`
    /// (positions never move).
    pub smoothing: f32,

    /// Most hands tracked at once.
    pub max_hands: usize,

    pub field_of_view: FieldOfView,

    /// Distance from a face of the field of view at which a hand counts as
    /// touching it.
    pub edge_margin: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.0,
            max_hands: 10,
            field_of_view: FieldOfView::default(),
            edge_margin: 50.0,
        }
    }
}

impl TrackerConfig {
    /// Defaults overridden by `HANDTRACK_*` environment variables.
    pub fn from_env() -> Result<Self, TrackerError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, TrackerError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `HANDTRACK_SMOOTHING`, `HANDTRACK_MAX_HANDS` and
    /// `HANDTRACK_EDGE_MARGIN` from `lookup`, then validates.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, TrackerError> {
        if let Some(v) = lookup("HANDTRACK_SMOOTHING") {
            self.smoothing = parse_var("HANDTRACK_SMOOTHING", &v)?;
        }
        if let Some(v) = lookup("HANDTRACK_MAX_HANDS") {
            self.max_hands = parse_var("HANDTRACK_MAX_HANDS", &v)?;
        }
        if let Some(v) = lookup("HANDTRACK_EDGE_MARGIN") {
            self.edge_margin = parse_var("HANDTRACK_EDGE_MARGIN", &v)?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(TrackerError::InvalidSmoothing(self.smoothing));
        }
        if self.max_hands == 0 {
            return Err(TrackerError::InvalidConfig(
                "max_hands must be at least 1".to_string(),
            ));
        }
        if !self.edge_margin.is_finite() || self.edge_margin < 0.0 {
            return Err(TrackerError::InvalidConfig(format!(
                "edge_margin must be a non-negative number, got {}",
                self.edge_margin
            )));
        }
        let fov = &self.field_of_view;
        if !(fov.min.x < fov.max.x && fov.min.y < fov.max.y && fov.min.z < fov.max.z) {
            return Err(TrackerError::InvalidConfig(format!(
                "field_of_view min {} must be below max {} on every axis",
                fov.min, fov.max
            )));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, TrackerError> {
    value
        .trim()
        .parse()
        .map_err(|_| TrackerError::InvalidConfig(format!("{key}: cannot parse '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        assert!(TrackerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("HANDTRACK_SMOOTHING", "0.25"),
            ("HANDTRACK_MAX_HANDS", " 2 "),
        ]
        .into_iter()
        .collect();
        let config = TrackerConfig::default()
            .with_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.smoothing, 0.25);
        assert_eq!(config.max_hands, 2);
        assert_eq!(config.edge_margin, 50.0);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = TrackerConfig::from_toml_str("dispatch_capacity = 64").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidConfig(_)));
    }

    #[test]
    fn test_unparsable_override() {
        let err = TrackerConfig::default()
            .with_overrides(|k| (k == "HANDTRACK_MAX_HANDS").then(|| "many".to_string()))
            .unwrap_err();
        assert!(matches!(err, TrackerError::InvalidConfig(_)));
    }

    #[test]
    fn test_toml_partial_document() {
        let config = TrackerConfig::from_toml_str(
            r#"
            smoothing = 0.5

            [field_of_view]
            min = { x = -10.0, y = -10.0, z = 0.0 }
            max = { x = 10.0, y = 10.0, z = 20.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.smoothing, 0.5);
        assert_eq!(config.max_hands, 10);
        assert_eq!(config.field_of_view.max, Point3D::new(10.0, 10.0, 20.0));
    }

    #[test]
    fn test_toml_rejects_bad_smoothing() {
        let err = TrackerConfig::from_toml_str("smoothing = 1.5").unwrap_err();
        assert_eq!(err, TrackerError::InvalidSmoothing(1.5));
    }

    #[test]
    fn test_toml_syntax_error() {
        let err = TrackerConfig::from_toml_str("smoothing = ").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidConfig(_)));
    }

    #[test]
    fn test_inverted_field_of_view() {
        let mut config = TrackerConfig::default();
        config.field_of_view.min.z = 5000.0;
        assert!(config.validate().is_err());
    }

    fn unit_box() -> FieldOfView {
        FieldOfView {
            min: Point3D::new(0.0, 0.0, 0.0),
            max: Point3D::new(100.0, 100.0, 100.0),
        }
    }

    #[rstest]
    #[case(Point3D::new(50.0, 50.0, 50.0), None)]
    #[case(Point3D::new(5.0, 50.0, 50.0), Some(Direction::Left))]
    #[case(Point3D::new(97.0, 50.0, 50.0), Some(Direction::Right))]
    #[case(Point3D::new(50.0, 99.0, 50.0), Some(Direction::Up))]
    #[case(Point3D::new(50.0, 1.0, 50.0), Some(Direction::Down))]
    #[case(Point3D::new(50.0, 50.0, 2.0), Some(Direction::Forward))]
    #[case(Point3D::new(50.0, 50.0, 95.0), Some(Direction::Backward))]
    #[case(Point3D::new(-20.0, 50.0, 50.0), Some(Direction::Left))]
    fn test_touching_edge(#[case] position: Point3D, #[case] expected: Option<Direction>) {
        assert_eq!(unit_box().touching_edge(position, 10.0), expected);
    }

    #[test]
    fn test_touching_edge_prefers_closest_face() {
        let edge = unit_box().touching_edge(Point3D::new(8.0, 97.0, 50.0), 10.0);
        assert_eq!(edge, Some(Direction::Up));
    }

    #[test]
    fn test_touching_edge_tie_goes_to_first_face() {
        let edge = unit_box().touching_edge(Point3D::new(5.0, 95.0, 50.0), 10.0);
        assert_eq!(edge, Some(Direction::Left));
    }
}
