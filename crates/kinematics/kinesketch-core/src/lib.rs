//! Kinesketch Core (engine-agnostic)
//!
//! Reconciles three linked kinematic curves over a fixed time window. The user
//! edits control points of any one curve (acceleration, velocity or position);
//! the core derives the other two so that acceleration integrates to velocity
//! and velocity integrates to position, then samples dense series for
//! plotting and drives a playback cursor for the animated point.
//!
//! Rendering, input handling and frame timing live outside this crate. Hosts
//! feed edits and frame callbacks in and read series and control points back.

pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod inputs;
pub mod integrate;
pub mod interp;
pub mod outputs;
pub mod presets;
pub mod reconcile;
pub mod sampling;
pub mod scheduler;
pub mod session;

// Re-exports for consumers (adapters)
pub use config::{CurveStyle, DisplayConfig, SimulationConfig};
pub use data::{ControlPoint, ControlPointSequence, CurveKind, DenseSeries};
pub use error::{KinematicsError, Result};
pub use inputs::SessionCommand;
pub use outputs::SessionEvent;
pub use reconcile::{
    compute_from_acceleration, compute_from_position, compute_from_velocity, Reconciliation,
};
pub use scheduler::{FrameScheduler, FrameToken, ManualScheduler};
pub use session::{Cursor, FrameOutcome, Session};
