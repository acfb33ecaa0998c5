//! Command surface for input adapters.
//!
//! Each command maps to one [`crate::Session`] method; adapters that prefer
//! message passing build these and hand them to [`crate::Session::apply`].

use serde::{Deserialize, Serialize};

use crate::data::ControlPointSequence;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionCommand {
    Play,
    Pause,
    Step,
    Reset,
    UpdateAcceleration { points: ControlPointSequence },
    UpdateVelocity { points: ControlPointSequence },
    UpdatePosition { points: ControlPointSequence },
    SetLockEndVelocity { enabled: bool },
    PresetEaseInOut,
}
