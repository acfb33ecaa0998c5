//! Curve data model: control points, control-point sequences and dense series.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{KinematicsError, Result};

/// Tolerance used when checking that a sequence spans the simulation window.
const WINDOW_EPS: f64 = 1e-9;

/// The three linked curves. Acceleration is the root; the others are derived.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    Acceleration,
    Velocity,
    Position,
}

impl CurveKind {
    pub const ALL: [CurveKind; 3] = [
        CurveKind::Acceleration,
        CurveKind::Velocity,
        CurveKind::Position,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CurveKind::Acceleration => "acceleration",
            CurveKind::Velocity => "velocity",
            CurveKind::Position => "position",
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user-editable sample of a curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Time in seconds within `[0, max_time]`.
    pub t: f64,
    pub value: f64,
    /// False for the first and last point, which anchor the window.
    #[serde(rename = "isDraggable", default)]
    pub is_draggable: bool,
}

impl ControlPoint {
    pub fn new(t: f64, value: f64) -> Self {
        Self {
            t,
            value,
            is_draggable: false,
        }
    }

    pub fn draggable(t: f64, value: f64) -> Self {
        Self {
            t,
            value,
            is_draggable: true,
        }
    }
}

/// Control points of one curve.
///
/// Well-formed sequences hold at least two points, start at `t = 0`, end at
/// `t = max_time` and never repeat a time. Sequences coming from an input
/// adapter may violate any of this, so every consumer in the engine works on
/// [`ControlPointSequence::sorted`] and tolerates degenerate input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlPointSequence {
    points: Vec<ControlPoint>,
}

impl ControlPointSequence {
    pub fn new(points: Vec<ControlPoint>) -> Self {
        Self { points }
    }

    /// Build a sequence from `(t, value)` pairs; interior points are draggable.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let n = pairs.len();
        let points = pairs
            .iter()
            .enumerate()
            .map(|(i, &(t, value))| ControlPoint {
                t,
                value,
                is_draggable: i > 0 && i + 1 < n,
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut [ControlPoint] {
        &mut self.points
    }

    pub fn into_points(self) -> Vec<ControlPoint> {
        self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Copy of this sequence ordered by time. Equal times keep their input order.
    pub fn sorted(&self) -> Self {
        let mut points = self.points.clone();
        points.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self { points }
    }

    /// Number of distinct times in the sequence.
    pub fn distinct_times(&self) -> usize {
        let sorted = self.sorted();
        let mut count = 0;
        let mut last: Option<f64> = None;
        for p in sorted.iter() {
            if last != Some(p.t) {
                count += 1;
                last = Some(p.t);
            }
        }
        count
    }

    /// True when the sequence cannot describe a curve (fewer than two distinct times).
    pub fn is_degenerate(&self) -> bool {
        self.distinct_times() < 2
    }

    /// Copy with every value shifted by `bias`.
    pub fn shifted(&self, bias: f64) -> Self {
        let points = self
            .points
            .iter()
            .map(|p| ControlPoint {
                value: p.value + bias,
                ..*p
            })
            .collect();
        Self { points }
    }

    /// Nearest point to `t` within `tolerance`, by index.
    pub fn nearest_index(&self, t: f64, tolerance: f64) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, (p.t - t).abs()))
            .filter(|(_, d)| *d < tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Check the structural invariants of a well-formed sequence for `kind`.
    pub fn validate(&self, kind: CurveKind, max_time: f64) -> Result<()> {
        for (index, p) in self.points.iter().enumerate() {
            if !p.t.is_finite() || !p.value.is_finite() {
                return Err(KinematicsError::NonFiniteValue { kind, index });
            }
            if p.t < 0.0 {
                return Err(KinematicsError::InvalidTime { time: p.t });
            }
        }
        let sorted = self.sorted();
        if sorted.len() < 2 {
            return Err(KinematicsError::TooFewPoints {
                kind,
                count: sorted.len(),
            });
        }
        for pair in sorted.windows(2) {
            if pair[0].t == pair[1].t {
                return Err(KinematicsError::DuplicateTime { kind, t: pair[0].t });
            }
        }
        let first = sorted[0].t;
        let last = sorted[sorted.len() - 1].t;
        if first.abs() > WINDOW_EPS || (last - max_time).abs() > WINDOW_EPS {
            return Err(KinematicsError::WindowMismatch {
                kind,
                max_time,
                first,
                last,
            });
        }
        Ok(())
    }
}

impl Deref for ControlPointSequence {
    type Target = [ControlPoint];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl From<Vec<ControlPoint>> for ControlPointSequence {
    fn from(points: Vec<ControlPoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<ControlPoint> for ControlPointSequence {
    fn from_iter<I: IntoIterator<Item = ControlPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Fixed-step samples of all three curves over `[0, max_time]`.
///
/// All four vectors have the same length and share the `time` axis. A series
/// is produced fresh by every recomputation and replaced wholesale.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DenseSeries {
    pub time: Vec<f64>,
    pub acceleration: Vec<f64>,
    pub velocity: Vec<f64>,
    pub position: Vec<f64>,
}

impl DenseSeries {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            time: Vec::with_capacity(n),
            acceleration: Vec::with_capacity(n),
            velocity: Vec::with_capacity(n),
            position: Vec::with_capacity(n),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn values(&self, kind: CurveKind) -> &[f64] {
        match kind {
            CurveKind::Acceleration => &self.acceleration,
            CurveKind::Velocity => &self.velocity,
            CurveKind::Position => &self.position,
        }
    }

    #[inline]
    pub fn push(&mut self, t: f64, acceleration: f64, velocity: f64, position: f64) {
        self.time.push(t);
        self.acceleration.push(acceleration);
        self.velocity.push(velocity);
        self.position.push(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_marks_only_interior_draggable() {
        let seq = ControlPointSequence::from_pairs(&[(0.0, 0.0), (1.0, 2.0), (2.0, 0.0)]);
        let flags: Vec<bool> = seq.iter().map(|p| p.is_draggable).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn sorted_orders_by_time_without_touching_input() {
        let seq = ControlPointSequence::from_pairs(&[(2.0, 1.0), (0.0, 3.0), (1.0, 2.0)]);
        let sorted = seq.sorted();
        let times: Vec<f64> = sorted.iter().map(|p| p.t).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
        assert_eq!(seq[0].t, 2.0);
    }

    #[test]
    fn distinct_times_ignores_duplicates() {
        let seq = ControlPointSequence::from_pairs(&[(1.0, 0.0), (1.0, 5.0)]);
        assert_eq!(seq.distinct_times(), 1);
        assert!(seq.is_degenerate());
        assert!(ControlPointSequence::default().is_degenerate());
    }

    #[test]
    fn nearest_index_respects_tolerance() {
        let seq = ControlPointSequence::from_pairs(&[(0.0, 0.0), (1.0, 1.0), (1.008, 2.0)]);
        assert_eq!(seq.nearest_index(1.006, 0.01), Some(2));
        assert_eq!(seq.nearest_index(0.5, 0.01), None);
    }

    #[test]
    fn validate_reports_each_violation() {
        let ok = ControlPointSequence::from_pairs(&[(0.0, 0.0), (5.0, 0.0)]);
        assert!(ok.validate(CurveKind::Acceleration, 5.0).is_ok());

        let short = ControlPointSequence::from_pairs(&[(0.0, 0.0)]);
        assert!(matches!(
            short.validate(CurveKind::Velocity, 5.0),
            Err(KinematicsError::TooFewPoints { count: 1, .. })
        ));

        let dup = ControlPointSequence::from_pairs(&[(0.0, 0.0), (2.0, 1.0), (2.0, 3.0), (5.0, 0.0)]);
        assert!(matches!(
            dup.validate(CurveKind::Acceleration, 5.0),
            Err(KinematicsError::DuplicateTime { .. })
        ));

        let short_window = ControlPointSequence::from_pairs(&[(0.0, 0.0), (4.0, 0.0)]);
        assert!(matches!(
            short_window.validate(CurveKind::Position, 5.0),
            Err(KinematicsError::WindowMismatch { .. })
        ));

        let nan = ControlPointSequence::from_pairs(&[(0.0, f64::NAN), (5.0, 0.0)]);
        assert!(matches!(
            nan.validate(CurveKind::Acceleration, 5.0),
            Err(KinematicsError::NonFiniteValue { index: 0, .. })
        ));
    }

    #[test]
    fn control_point_json_uses_camel_case_flag() {
        let p: ControlPoint = serde_json::from_str(r#"{"t":1.5,"value":15,"isDraggable":true}"#)
            .expect("control point json");
        assert_eq!(p, ControlPoint::draggable(1.5, 15.0));
        let bare: ControlPoint = serde_json::from_str(r#"{"t":0,"value":0}"#).expect("json");
        assert!(!bare.is_draggable);
    }
}
