//! Interpolation helpers for the three curve kinds.
//!
//! Acceleration is piecewise-linear between control points, velocity is a
//! quadratic Bezier per segment and position is a cubic Hermite per segment.

pub mod functions;

pub use functions::{cubic_segment, interpolate_linear, quadratic_segment};
