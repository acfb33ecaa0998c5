//! Trapezoidal integration over control points and sampled series.

use crate::data::{ControlPoint, ControlPointSequence};

/// Running velocity and position at each acceleration control point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Accumulated {
    pub velocity: Vec<f64>,
    pub position: Vec<f64>,
}

/// Integrate acceleration control points forward from rest at the origin.
///
/// `sorted` must be ordered by time. Velocity uses the trapezoidal rule per
/// segment; position adds the `(a0 - a1) * dt^2 / 12` term, which is the exact
/// integral of the cubic velocity profile implied by linear acceleration.
/// Zero-length segments contribute nothing.
pub fn accumulate(sorted: &[ControlPoint]) -> Accumulated {
    let mut velocity = Vec::with_capacity(sorted.len());
    let mut position = Vec::with_capacity(sorted.len());
    if sorted.is_empty() {
        return Accumulated { velocity, position };
    }
    let mut v = 0.0;
    let mut x = 0.0;
    velocity.push(v);
    position.push(x);
    for pair in sorted.windows(2) {
        let (a0, a1) = (pair[0].value, pair[1].value);
        let dt = (pair[1].t - pair[0].t).max(0.0);
        let v0 = v;
        v += 0.5 * (a0 + a1) * dt;
        x += (v0 + v) * dt / 2.0 + (a0 - a1) * dt * dt / 12.0;
        velocity.push(v);
        position.push(x);
    }
    Accumulated { velocity, position }
}

/// Net signed area under piecewise-linear control points (trapezoidal rule).
pub fn trapezoid_area(points: &[ControlPoint]) -> f64 {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.t.total_cmp(&b.t));
    sorted
        .windows(2)
        .map(|pair| 0.5 * (pair[0].value + pair[1].value) * (pair[1].t - pair[0].t))
        .sum()
}

/// Trapezoidal integral of sampled values over their time axis.
pub fn trapezoid_samples(time: &[f64], values: &[f64]) -> f64 {
    time.windows(2)
        .zip(values.windows(2))
        .map(|(t, v)| 0.5 * (v[0] + v[1]) * (t[1] - t[0]))
        .sum()
}

/// Constant offset that makes the acceleration area over `[0, max_time]` zero.
pub fn zero_area_bias(points: &[ControlPoint], max_time: f64) -> f64 {
    if max_time <= 0.0 {
        return 0.0;
    }
    -trapezoid_area(points) / max_time
}

/// Shift acceleration uniformly so the terminal velocity equals the initial one.
///
/// The curve's shape is unchanged; only its bias moves.
pub fn enforce_zero_end_velocity(
    points: &ControlPointSequence,
    max_time: f64,
) -> ControlPointSequence {
    let bias = zero_area_bias(points, max_time);
    log::debug!("end-velocity lock: shifting acceleration by {bias}");
    points.shifted(bias)
}
