//! Error types for configuration and control-point validation.
//!
//! The numeric engine never fails: degenerate input degrades the produced
//! curves instead. Errors only surface where a host hands the core a
//! configuration or asks for an explicit validity check.

use serde::{Deserialize, Serialize};

use crate::data::CurveKind;

pub type Result<T> = std::result::Result<T, KinematicsError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum KinematicsError {
    /// Configuration rejected by [`crate::SimulationConfig::validate`].
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A time value that is negative or not finite.
    #[error("Invalid time value: {time}")]
    InvalidTime { time: f64 },

    #[error("{kind} curve needs at least 2 control points with distinct times, got {count}")]
    TooFewPoints { kind: CurveKind, count: usize },

    #[error("{kind} curve has more than one control point at t = {t}")]
    DuplicateTime { kind: CurveKind, t: f64 },

    #[error("{kind} control point {index} is not finite")]
    NonFiniteValue { kind: CurveKind, index: usize },

    /// Window endpoints missing from a control-point sequence.
    #[error("{kind} curve must span [0, {max_time}], got [{first}, {last}]")]
    WindowMismatch {
        kind: CurveKind,
        max_time: f64,
        first: f64,
        last: f64,
    },

    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl KinematicsError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "config",
            Self::InvalidTime { .. }
            | Self::TooFewPoints { .. }
            | Self::DuplicateTime { .. }
            | Self::NonFiniteValue { .. }
            | Self::WindowMismatch { .. } => "validation",
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for KinematicsError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}
