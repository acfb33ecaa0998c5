//! Session configuration: simulation window, playback constants and display hints.
//!
//! The core treats all of this as opaque constants supplied at session
//! construction. Hosts usually start from [`SimulationConfig::default`] or load
//! a JSON document with [`SimulationConfig::from_json`].

use serde::{Deserialize, Serialize};

use crate::data::{ControlPointSequence, CurveKind};
use crate::error::{KinematicsError, Result};
use crate::presets;
use crate::reconcile::MATCH_TOLERANCE;
use crate::sampling;

/// Styling and axis hints for one curve's chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveStyle {
    pub title: String,
    pub unit: String,
    /// CSS-style color identifier, opaque to the core.
    pub color: String,
    /// Axis bounds are rounded outward to a multiple of this.
    #[serde(rename = "roundTo")]
    pub round_to: f64,
    /// Smallest span the axis should show.
    #[serde(rename = "minRange", default)]
    pub min_range: Option<f64>,
}

impl CurveStyle {
    fn new(title: &str, unit: &str, color: &str, round_to: f64, min_range: Option<f64>) -> Self {
        Self {
            title: title.to_string(),
            unit: unit.to_string(),
            color: color.to_string(),
            round_to,
            min_range,
        }
    }
}

/// Per-curve display hints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub acceleration: CurveStyle,
    pub velocity: CurveStyle,
    pub position: CurveStyle,
}

impl DisplayConfig {
    pub fn style(&self, kind: CurveKind) -> &CurveStyle {
        match kind {
            CurveKind::Acceleration => &self.acceleration,
            CurveKind::Velocity => &self.velocity,
            CurveKind::Position => &self.position,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            acceleration: CurveStyle::new("Acceleration (m/s²)", "m/s²", "#FF6B6B", 5.0, None),
            velocity: CurveStyle::new("Velocity (m/s)", "m/s", "#4ECDC4", 5.0, Some(10.0)),
            position: CurveStyle::new("Position (m)", "m", "#45B7D1", 10.0, Some(20.0)),
        }
    }
}

/// Configuration for a simulation session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Length of the time window in seconds.
    pub max_time: f64,
    /// Dense-series sample spacing in seconds.
    pub dt: f64,
    /// Cursor advance for a single `step()`.
    pub step_increment: f64,
    /// Initial state of the zero end-velocity lock.
    pub lock_end_velocity: bool,
    /// Multiplier from wall-clock seconds to simulated seconds during playback.
    pub playback_speed: f64,
    /// Distance used by the finish-time query.
    pub finish_position: f64,
    /// Window for matching velocity points to acceleration points.
    pub match_tolerance: f64,
    /// Acceleration control points restored by `reset()`.
    pub default_acceleration: ControlPointSequence,
    pub display: DisplayConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_time: 5.0,
            dt: 0.01,
            step_increment: 0.1,
            lock_end_velocity: true,
            playback_speed: 1.0,
            finish_position: 100.0,
            match_tolerance: MATCH_TOLERANCE,
            default_acceleration: presets::default_acceleration(),
            display: DisplayConfig::default(),
        }
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KinematicsError::InvalidConfig {
            reason: format!("{name} must be finite and > 0, got {value}"),
        })
    }
}

impl SimulationConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Number of dense samples a recomputation produces.
    pub fn sample_count(&self) -> usize {
        sampling::sample_times(self.max_time, self.dt).len()
    }

    /// Validate basic invariants (positive window and steps, usable default curve).
    pub fn validate(&self) -> Result<()> {
        positive("max_time", self.max_time)?;
        positive("dt", self.dt)?;
        positive("step_increment", self.step_increment)?;
        positive("playback_speed", self.playback_speed)?;
        positive("match_tolerance", self.match_tolerance)?;
        if self.dt > self.max_time {
            return Err(KinematicsError::InvalidConfig {
                reason: format!("dt ({}) exceeds max_time ({})", self.dt, self.max_time),
            });
        }
        if !sampling::grid_fits(self.max_time, self.dt) {
            return Err(KinematicsError::InvalidConfig {
                reason: format!(
                    "max_time / dt ({} / {}) exceeds {} samples",
                    self.max_time,
                    self.dt,
                    sampling::MAX_SAMPLES
                ),
            });
        }
        if !self.finish_position.is_finite() {
            return Err(KinematicsError::InvalidConfig {
                reason: "finish_position must be finite".into(),
            });
        }
        self.default_acceleration
            .validate(CurveKind::Acceleration, self.max_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SimulationConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.sample_count(), 501);
        assert_eq!(cfg.display.style(CurveKind::Position).min_range, Some(20.0));
    }

    #[test]
    fn rejects_bad_window() {
        let cfg = SimulationConfig {
            dt: 0.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(KinematicsError::InvalidConfig { .. })
        ));

        let cfg = SimulationConfig {
            dt: 10.0,
            ..SimulationConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_unbounded_sample_count() {
        let cfg = SimulationConfig {
            dt: 1e-300,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(KinematicsError::InvalidConfig { .. })
        ));

        let cfg = SimulationConfig {
            dt: 1e-4,
            ..SimulationConfig::default()
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.sample_count(), 50_001);
    }

    #[test]
    fn default_curve_must_span_window() {
        let cfg = SimulationConfig {
            max_time: 8.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(KinematicsError::WindowMismatch { .. })
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = SimulationConfig::from_json(r#"{ "dt": 0.05, "lock_end_velocity": false }"#)
            .expect("config json");
        assert_eq!(cfg.dt, 0.05);
        assert!(!cfg.lock_end_velocity);
        assert_eq!(cfg.max_time, 5.0);
        assert_eq!(cfg.default_acceleration.len(), 4);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        assert!(matches!(
            SimulationConfig::from_json("{ dt: }"),
            Err(KinematicsError::SerializationError { .. })
        ));
    }
}
