//! Interpolation helpers:
//! - interpolate_linear (clamped piecewise-linear sampling of control points)
//! - quadratic_segment (Bezier velocity blend with a Simpson-consistent midpoint)
//! - cubic_segment (Hermite position through endpoint positions and velocities)

use crate::data::ControlPoint;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Quadratic Bezier basis evaluated at `tau` in [0, 1].
#[inline]
fn quadratic_bezier(p0: f64, p1: f64, p2: f64, tau: f64) -> f64 {
    let u = 1.0 - tau;
    u * u * p0 + 2.0 * u * tau * p1 + tau * tau * p2
}

/// Sample control points at `t`, holding the boundary value outside the covered range.
///
/// The input does not need to be ordered; a sorted copy is used.
pub fn interpolate_linear(points: &[ControlPoint], t: f64) -> f64 {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.t.total_cmp(&b.t));
    interpolate_linear_sorted(&sorted, t)
}

/// [`interpolate_linear`] for points already ordered by time.
pub(crate) fn interpolate_linear_sorted(sorted: &[ControlPoint], t: f64) -> f64 {
    let (first, last) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0.0,
    };
    if t <= first.t {
        return first.value;
    }
    if t >= last.t {
        return last.value;
    }
    for pair in sorted.windows(2) {
        let (p0, p1) = (&pair[0], &pair[1]);
        if t >= p0.t && t <= p1.t {
            let span = p1.t - p0.t;
            if span <= 0.0 {
                return p0.value;
            }
            return lerp(p0.value, p1.value, (t - p0.t) / span);
        }
    }
    0.0
}

/// Smooth velocity at `t` within `[t0, t1]` from boundary velocities and accelerations.
///
/// The Bezier midpoint is `(v0 + v1) / 2 + (a0 - a1) * dt / 8`, so the blend is
/// not kinked at control points while its mean slope still follows the
/// segment's average acceleration. A zero-length segment yields `v0`.
#[inline]
pub fn quadratic_segment(t0: f64, v0: f64, a0: f64, t1: f64, v1: f64, a1: f64, t: f64) -> f64 {
    let dt = t1 - t0;
    if dt <= 0.0 {
        return v0;
    }
    let tau = (t - t0) / dt;
    let v_mid = (v0 + v1) / 2.0 + (a0 - a1) * dt / 8.0;
    quadratic_bezier(v0, v_mid, v1, tau)
}

/// Cubic Hermite position at `t` within `[t0, t1]`.
///
/// Passes through `x0` and `x1` with slopes `v0` and `v1`. A zero-length
/// segment yields `x0`.
#[inline]
pub fn cubic_segment(t0: f64, x0: f64, v0: f64, t1: f64, x1: f64, v1: f64, t: f64) -> f64 {
    let dt = t1 - t0;
    if dt <= 0.0 {
        return x0;
    }
    let tau = (t - t0) / dt;
    let tau2 = tau * tau;
    let tau3 = tau2 * tau;
    let h00 = 2.0 * tau3 - 3.0 * tau2 + 1.0;
    let h10 = tau3 - 2.0 * tau2 + tau;
    let h01 = -2.0 * tau3 + 3.0 * tau2;
    let h11 = tau3 - tau2;
    h00 * x0 + h10 * dt * v0 + h01 * x1 + h11 * dt * v1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn linear_clamps_outside_range() {
        let pts = [ControlPoint::new(1.0, 4.0), ControlPoint::new(3.0, 8.0)];
        assert_eq!(interpolate_linear(&pts, 0.0), 4.0);
        assert_eq!(interpolate_linear(&pts, 10.0), 8.0);
        approx(interpolate_linear(&pts, 2.0), 6.0, 1e-12);
    }

    #[test]
    fn linear_sorts_unordered_points() {
        let pts = [
            ControlPoint::new(2.0, 20.0),
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(1.0, 10.0),
        ];
        approx(interpolate_linear(&pts, 1.5), 15.0, 1e-12);
    }

    #[test]
    fn linear_empty_is_zero() {
        assert_eq!(interpolate_linear(&[], 1.0), 0.0);
    }

    #[test]
    fn quadratic_hits_endpoints() {
        approx(quadratic_segment(0.0, 1.0, 2.0, 2.0, 5.0, -1.0, 0.0), 1.0, 1e-12);
        approx(quadratic_segment(0.0, 1.0, 2.0, 2.0, 5.0, -1.0, 2.0), 5.0, 1e-12);
    }

    #[test]
    fn quadratic_constant_acceleration_is_linear() {
        // a0 == a1 removes the midpoint correction: the blend is a straight line.
        approx(quadratic_segment(0.0, 0.0, 3.0, 2.0, 6.0, 3.0, 1.0), 3.0, 1e-12);
        approx(quadratic_segment(0.0, 0.0, 3.0, 2.0, 6.0, 3.0, 0.5), 1.5, 1e-12);
    }

    #[test]
    fn quadratic_midpoint_correction() {
        // tau = 0.5 -> 0.25 v0 + 0.5 v_mid + 0.25 v1
        let v_mid = (0.0 + 4.0) / 2.0 + (4.0 - 0.0) * 2.0 / 8.0;
        let expected = 0.5 * v_mid + 0.25 * 4.0;
        approx(quadratic_segment(0.0, 0.0, 4.0, 2.0, 4.0, 0.0, 1.0), expected, 1e-12);
    }

    #[test]
    fn cubic_passes_through_endpoints() {
        approx(cubic_segment(1.0, 2.0, 3.0, 3.0, 7.0, -1.0, 1.0), 2.0, 1e-12);
        approx(cubic_segment(1.0, 2.0, 3.0, 3.0, 7.0, -1.0, 3.0), 7.0, 1e-12);
    }

    #[test]
    fn cubic_reproduces_uniform_motion() {
        // x = 2 t with v = 2 everywhere.
        for i in 0..=10 {
            let t = i as f64 * 0.1;
            approx(cubic_segment(0.0, 0.0, 2.0, 1.0, 2.0, 2.0, t), 2.0 * t, 1e-12);
        }
    }

    #[test]
    fn zero_length_segments_return_left_value() {
        assert_eq!(quadratic_segment(1.0, 3.0, 0.0, 1.0, 9.0, 0.0, 1.0), 3.0);
        assert_eq!(cubic_segment(1.0, 3.0, 0.0, 1.0, 9.0, 0.0, 1.0), 3.0);
    }
}
