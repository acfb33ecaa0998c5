//! Dense-series synthesis from sorted acceleration control points.
//!
//! Model:
//! - Acceleration is sampled piecewise-linearly through its control points.
//! - Velocity uses a quadratic Bezier per segment (see [`quadratic_segment`]).
//! - Position uses a cubic Hermite per segment (see [`cubic_segment`]) through
//!   the accumulated control-point positions and velocities.
//! - Past the last control point velocity and position hold their final
//!   values; before the first they are at rest at the origin.

use crate::data::{ControlPoint, DenseSeries};
use crate::integrate::Accumulated;
use crate::interp::functions::{cubic_segment, interpolate_linear_sorted, quadratic_segment};

/// Slack applied when deciding whether the last step lands on `max_time`.
const GRID_EPS: f64 = 1e-9;

/// Upper bound on the number of grid steps in one window.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Where a sample time falls relative to the control points.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Segment {
    Before,
    /// Inside `[points[i].t, points[i + 1].t]`; the first matching segment wins.
    Inside(usize),
    After,
}

pub(crate) fn find_segment(sorted: &[ControlPoint], t: f64) -> Segment {
    // Linear scan; the leftmost bracketing segment wins.
    for (i, pair) in sorted.windows(2).enumerate() {
        if t >= pair[0].t && t <= pair[1].t {
            return Segment::Inside(i);
        }
    }
    match sorted.last() {
        Some(last) if t > last.t => Segment::After,
        _ => Segment::Before,
    }
}

fn grid_steps(max_time: f64, dt: f64) -> f64 {
    max_time / dt + GRID_EPS
}

/// Whether the grid for `max_time` and `dt` stays within [`MAX_SAMPLES`] steps.
pub(crate) fn grid_fits(max_time: f64, dt: f64) -> bool {
    grid_steps(max_time, dt) <= MAX_SAMPLES as f64
}

/// Sample times `0, dt, 2 dt, ..` up to and including `max_time`.
///
/// Times are computed as `i * dt` rather than accumulated, and the final
/// sample is pinned to `max_time`. Invalid windows, and windows needing more
/// than [`MAX_SAMPLES`] steps, yield the single time 0.
pub fn sample_times(max_time: f64, dt: f64) -> Vec<f64> {
    if !max_time.is_finite() || max_time <= 0.0 || !dt.is_finite() || dt <= 0.0 {
        return vec![0.0];
    }
    if !grid_fits(max_time, dt) {
        log::warn!(
            "sample grid max_time={} dt={} exceeds {} steps; using a single sample",
            max_time,
            dt,
            MAX_SAMPLES
        );
        return vec![0.0];
    }
    let steps = grid_steps(max_time, dt).floor() as usize;
    let mut times: Vec<f64> = (0..=steps).map(|i| i as f64 * dt).collect();
    if let Some(last) = times.last_mut() {
        if (max_time - *last).abs() <= GRID_EPS * max_time.max(1.0) {
            *last = max_time;
        } else if *last < max_time {
            times.push(max_time);
        }
    }
    times
}

/// Velocity at `t` from the bracketing acceleration segment.
pub(crate) fn velocity_at(sorted: &[ControlPoint], acc: &Accumulated, t: f64) -> f64 {
    match find_segment(sorted, t) {
        Segment::Inside(i) => quadratic_segment(
            sorted[i].t,
            acc.velocity[i],
            sorted[i].value,
            sorted[i + 1].t,
            acc.velocity[i + 1],
            sorted[i + 1].value,
            t,
        ),
        Segment::After => acc.velocity.last().copied().unwrap_or(0.0),
        Segment::Before => 0.0,
    }
}

/// Position at `t` from the bracketing acceleration segment.
pub(crate) fn position_at(sorted: &[ControlPoint], acc: &Accumulated, t: f64) -> f64 {
    match find_segment(sorted, t) {
        Segment::Inside(i) => cubic_segment(
            sorted[i].t,
            acc.position[i],
            acc.velocity[i],
            sorted[i + 1].t,
            acc.position[i + 1],
            acc.velocity[i + 1],
            t,
        ),
        Segment::After => acc.position.last().copied().unwrap_or(0.0),
        Segment::Before => 0.0,
    }
}

/// Build the dense series for sorted acceleration points and their accumulation.
pub fn sample_dense(
    sorted: &[ControlPoint],
    acc: &Accumulated,
    max_time: f64,
    dt: f64,
) -> DenseSeries {
    let times = sample_times(max_time, dt);
    let mut series = DenseSeries::with_capacity(times.len());
    for t in times {
        series.push(
            t,
            interpolate_linear_sorted(sorted, t),
            velocity_at(sorted, acc, t),
            position_at(sorted, acc, t),
        );
    }
    series
}

/// Zero-valued series on the standard time grid.
pub fn zero_series(max_time: f64, dt: f64) -> DenseSeries {
    let times = sample_times(max_time, dt);
    let n = times.len();
    DenseSeries {
        time: times,
        acceleration: vec![0.0; n],
        velocity: vec![0.0; n],
        position: vec![0.0; n],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ControlPointSequence;
    use crate::integrate::accumulate;

    #[test]
    fn default_grid_has_inclusive_end() {
        let times = sample_times(5.0, 0.01);
        assert_eq!(times.len(), 501);
        assert_eq!(times[0], 0.0);
        assert_eq!(*times.last().unwrap(), 5.0);
    }

    #[test]
    fn uneven_grid_appends_max_time() {
        let times = sample_times(1.0, 0.3);
        assert_eq!(times.len(), 5);
        assert_eq!(*times.last().unwrap(), 1.0);
        assert!(times.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn invalid_grid_is_single_sample() {
        assert_eq!(sample_times(5.0, 0.0), vec![0.0]);
        assert_eq!(sample_times(-1.0, 0.1), vec![0.0]);
    }

    #[test]
    fn oversized_grid_fails_soft() {
        assert_eq!(sample_times(5.0, 1e-300), vec![0.0]);
        assert_eq!(sample_times(1.0, 1.0 / (MAX_SAMPLES as f64 * 2.0)), vec![0.0]);

        let pts = ControlPointSequence::from_pairs(&[(0.0, 1.0), (5.0, 1.0)]);
        let acc = accumulate(&pts);
        let series = sample_dense(&pts, &acc, 5.0, 1e-300);
        assert_eq!(series.len(), 1);
        assert_eq!(series.position[0], 0.0);
    }

    #[test]
    fn segment_lookup() {
        let pts = ControlPointSequence::from_pairs(&[(0.5, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(find_segment(&pts, 0.0), Segment::Before);
        assert_eq!(find_segment(&pts, 0.5), Segment::Inside(0));
        // A shared boundary belongs to the earlier segment.
        assert_eq!(find_segment(&pts, 1.0), Segment::Inside(0));
        assert_eq!(find_segment(&pts, 1.5), Segment::Inside(1));
        assert_eq!(find_segment(&pts, 2.5), Segment::After);
    }

    #[test]
    fn trailing_samples_hold_final_values() {
        // Control points stop at t = 1 inside a 2 s window.
        let pts = ControlPointSequence::from_pairs(&[(0.0, 2.0), (1.0, 2.0)]);
        let acc = accumulate(&pts);
        let series = sample_dense(&pts, &acc, 2.0, 0.25);
        let tail: Vec<usize> = (0..series.len()).filter(|&i| series.time[i] > 1.0).collect();
        assert!(!tail.is_empty());
        for i in tail {
            assert_eq!(series.velocity[i], 2.0);
            assert_eq!(series.position[i], 1.0);
            assert_eq!(series.acceleration[i], 2.0);
        }
    }
}
