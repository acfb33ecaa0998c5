//! Axis hints for renderers.

use crate::config::CurveStyle;

/// Rounded `[min, max]` axis range for plotted values.
///
/// The range always includes zero, is rounded outward to `style.round_to`
/// and is widened symmetrically to at least `style.min_range`.
pub fn axis_range(values: &[f64], style: &CurveStyle) -> (f64, f64) {
    let (mut lo, mut hi) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if style.round_to > 0.0 {
        lo = (lo / style.round_to).floor() * style.round_to;
        hi = (hi / style.round_to).ceil() * style.round_to;
    }
    if let Some(min_range) = style.min_range {
        let span = hi - lo;
        if span < min_range {
            let pad = (min_range - span) / 2.0;
            lo -= pad;
            hi += pad;
        }
    }
    (lo, hi)
}
