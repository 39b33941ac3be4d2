use std::path::PathBuf;

use thiserror::Error;

use crate::belt::BeltId;

/// Convenient result alias for the oven transit library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a raw speed entry is empty, unparsable, non-positive or non-finite.
    #[error("invalid speed {value:?}: {reason}")]
    InvalidSpeed { value: String, reason: String },

    /// Raised when the input thickness is negative or non-finite.
    #[error("invalid input thickness {value:?}: must be a finite, non-negative number of cm")]
    InvalidThickness { value: String },

    /// Raised when a reference or anchor constant is missing or non-positive.
    #[error("calibration error on {belt}: {message}")]
    Calibration { belt: BeltId, message: String },

    /// Raised when the time model receives a non-positive speed.
    #[error("division by a non-positive speed on {belt}")]
    Division { belt: BeltId },

    /// Raised when a timeline operation is invoked from an incompatible state.
    #[error("cannot {operation} while timeline is {state}")]
    InvalidTransition {
        operation: &'static str,
        state: String,
    },

    /// Raised when `advance` receives a negative or non-finite tick.
    #[error("invalid tick duration {dt}: must be finite and non-negative")]
    InvalidTick { dt: f64 },

    /// Raised when a belt identifier does not name one of the three belts.
    #[error("unknown belt identifier: {name}")]
    UnknownBelt { name: String },

    /// Raised when calibration is reloaded while a simulation is in flight.
    #[error("calibration cannot be reloaded while the simulation is {state}")]
    CalibrationLocked { state: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the anchor override store")]
    ProjectDirsUnavailable,

    /// Raised when the anchor override file cannot be parsed.
    #[error("failed to parse anchor overrides at {path}: {source}")]
    OverrideParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV writer errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn invalid_speed(value: impl ToString, reason: impl Into<String>) -> Self {
        Error::InvalidSpeed {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
