//! Built-in acceleration profiles.

use crate::data::ControlPointSequence;

/// Peak acceleration of the ease-in-out profile (m/s²).
pub const EASE_IN_OUT_PEAK: f64 = 18.0;

/// Startup acceleration curve for a 5 s window: hard launch, harder braking.
pub fn default_acceleration() -> ControlPointSequence {
    ControlPointSequence::from_pairs(&[(0.0, 0.0), (1.5, 15.0), (3.0, -20.0), (5.0, 0.0)])
}

/// Symmetric speed-up / slow-down over `[0, max_time]`.
///
/// Peaks at 30% and 70% of the window, so the net acceleration area is zero
/// and the end-velocity lock leaves it unchanged.
pub fn ease_in_out(max_time: f64) -> ControlPointSequence {
    let t = max_time;
    ControlPointSequence::from_pairs(&[
        (0.0, 0.0),
        (0.30 * t, EASE_IN_OUT_PEAK),
        (0.70 * t, -EASE_IN_OUT_PEAK),
        (t, 0.0),
    ])
}
