//! Curve reconciliation: rebuild all three curves from whichever one was edited.
//!
//! Derivation always runs forward (acceleration -> velocity -> position).
//! Velocity and position edits are first translated back into an adjusted
//! acceleration sequence, then the forward pass re-runs on that copy. Inputs
//! are never mutated.

use serde::{Deserialize, Serialize};

use crate::data::{ControlPoint, ControlPointSequence, DenseSeries};
use crate::integrate::accumulate;
use crate::sampling::{sample_dense, zero_series};

/// Time window for matching velocity points to acceleration points.
pub const MATCH_TOLERANCE: f64 = 0.01;

/// Everything derived from one acceleration sequence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub series: DenseSeries,
    /// Time-ordered acceleration points the series was built from.
    pub acceleration_points: ControlPointSequence,
    /// Accumulated velocity at each acceleration point time.
    pub velocity_points: ControlPointSequence,
    /// Accumulated position at each acceleration point time.
    pub position_points: ControlPointSequence,
}

fn derived_points(sorted: &[ControlPoint], values: &[f64]) -> ControlPointSequence {
    let n = sorted.len();
    sorted
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (p, &value))| ControlPoint {
            t: p.t,
            value,
            is_draggable: i > 0 && i + 1 < n,
        })
        .collect()
}

/// Build dense series and derived control points from acceleration points.
///
/// Velocity and position start from rest at the origin at the first point.
/// A sequence with fewer than two distinct times produces all-zero curves.
pub fn compute_from_acceleration(
    accel_points: &ControlPointSequence,
    max_time: f64,
    dt: f64,
) -> Reconciliation {
    let sorted = accel_points.sorted();
    if sorted.is_degenerate() {
        log::warn!(
            "acceleration curve has {} distinct control point time(s); producing zero curves",
            sorted.distinct_times()
        );
        let zeros = vec![0.0; sorted.len()];
        return Reconciliation {
            series: zero_series(max_time, dt),
            velocity_points: derived_points(&sorted, &zeros),
            position_points: derived_points(&sorted, &zeros),
            acceleration_points: sorted,
        };
    }

    let acc = accumulate(&sorted);
    let series = sample_dense(&sorted, &acc, max_time, dt);
    log::debug!(
        "recomputed curves from {} acceleration points into {} samples",
        sorted.len(),
        series.len()
    );
    Reconciliation {
        velocity_points: derived_points(&sorted, &acc.velocity),
        position_points: derived_points(&sorted, &acc.position),
        acceleration_points: sorted,
        series,
    }
}

/// Rebuild all curves after a velocity edit.
///
/// See [`compute_from_velocity_with_tolerance`]; uses [`MATCH_TOLERANCE`].
pub fn compute_from_velocity(
    velocity_points: &ControlPointSequence,
    accel_points: &ControlPointSequence,
    max_time: f64,
    dt: f64,
) -> Reconciliation {
    compute_from_velocity_with_tolerance(velocity_points, accel_points, max_time, dt, MATCH_TOLERANCE)
}

/// Rebuild all curves after a velocity edit, matching times within `tolerance`.
///
/// Walks the interior velocity points left to right. For each one the secant
/// slope from its predecessor is the segment's average acceleration, and the
/// acceleration point nearest in time is set so the trapezoidal average of it
/// and the preceding acceleration point equals that slope:
/// `a_i = 2 * slope - a_(i-1)`. Each step sees the values written by the
/// steps before it. Velocity points with no acceleration point within
/// `tolerance`, or with a non-positive segment duration, leave acceleration
/// untouched.
pub fn compute_from_velocity_with_tolerance(
    velocity_points: &ControlPointSequence,
    accel_points: &ControlPointSequence,
    max_time: f64,
    dt: f64,
    tolerance: f64,
) -> Reconciliation {
    let velocity = velocity_points.sorted();
    let mut adjusted = accel_points.sorted();

    for i in 1..velocity.len().saturating_sub(1) {
        if i >= adjusted.len() {
            continue;
        }
        let (prev, cur) = (velocity[i - 1], velocity[i]);
        let dt_seg = cur.t - prev.t;
        if dt_seg <= 0.0 {
            continue;
        }
        let a_avg = (cur.value - prev.value) / dt_seg;
        match adjusted.nearest_index(cur.t, tolerance) {
            Some(j) => {
                let a_prev = adjusted[i - 1].value;
                adjusted.points_mut()[j].value = 2.0 * a_avg - a_prev;
            }
            None => log::warn!(
                "no acceleration point within {tolerance} of velocity point at t = {}; skipped",
                cur.t
            ),
        }
    }

    compute_from_acceleration(&adjusted, max_time, dt)
}

#[inline]
fn secant_slope(a: &ControlPoint, b: &ControlPoint) -> f64 {
    let dt = b.t - a.t;
    if dt <= 0.0 {
        return 0.0;
    }
    (b.value - a.value) / dt
}

/// Rebuild all curves after a position edit.
///
/// Each interior position point's velocity is estimated as the mean of its
/// left and right secant slopes and written into the velocity point at the
/// same index; the result goes through [`compute_from_velocity`].
pub fn compute_from_position(
    position_points: &ControlPointSequence,
    velocity_points: &ControlPointSequence,
    accel_points: &ControlPointSequence,
    max_time: f64,
    dt: f64,
) -> Reconciliation {
    compute_from_position_with_tolerance(
        position_points,
        velocity_points,
        accel_points,
        max_time,
        dt,
        MATCH_TOLERANCE,
    )
}

/// [`compute_from_position`] with an explicit time-matching tolerance.
pub fn compute_from_position_with_tolerance(
    position_points: &ControlPointSequence,
    velocity_points: &ControlPointSequence,
    accel_points: &ControlPointSequence,
    max_time: f64,
    dt: f64,
    tolerance: f64,
) -> Reconciliation {
    let position = position_points.sorted();
    let mut velocity = velocity_points.sorted();

    for i in 1..position.len().saturating_sub(1) {
        if i >= velocity.len() {
            continue;
        }
        let left = secant_slope(&position[i - 1], &position[i]);
        let right = secant_slope(&position[i], &position[i + 1]);
        velocity.points_mut()[i].value = (left + right) / 2.0;
    }

    compute_from_velocity_with_tolerance(&velocity, accel_points, max_time, dt, tolerance)
}
