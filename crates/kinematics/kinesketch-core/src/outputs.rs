//! State-change notifications emitted by the session.
//!
//! Renderers either drain these with [`crate::Session::take_events`] or poll
//! [`crate::Session::revision`] and re-read whatever they display.

use serde::{Deserialize, Serialize};

use crate::data::CurveKind;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SessionEvent {
    /// All series and control points were replaced after an edit to `source`.
    CurvesRecomputed { source: CurveKind },
    PlaybackStarted { time: f64 },
    PlaybackPaused { time: f64 },
    /// Playback reached the end of the window and stopped.
    PlaybackEnded { time: f64 },
    TimeChanged { old_time: f64, new_time: f64 },
    LockEndVelocityChanged { enabled: bool },
}
