//! Transit time model ("L/v method").
//!
//! Each belt's transit time is its reference constant divided by its drive
//! frequency: `t_i = K_i / f_i` seconds. The total is the plain sum of the
//! three belts. No rounding happens here; rounding is left to display code.

use serde::{Deserialize, Serialize};

use crate::belt::{BeltId, BELT_COUNT};
use crate::calibration::BeltConstants;
use crate::error::{Error, Result};

/// Per-belt and total transit durations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitTimes {
    /// Transit time per belt, in seconds.
    pub seconds: [f64; BELT_COUNT],
    /// Sum of the per-belt seconds.
    pub total_seconds: f64,
}

impl TransitTimes {
    /// Transit time for one belt, in seconds.
    pub fn belt_seconds(&self, belt: BeltId) -> f64 {
        self.seconds[belt.index()]
    }

    /// Transit time for one belt, in minutes.
    pub fn belt_minutes(&self, belt: BeltId) -> f64 {
        self.belt_seconds(belt) / 60.0
    }

    /// Total transit time, in minutes, summed independently from the minute values.
    pub fn total_minutes(&self) -> f64 {
        BeltId::ALL
            .iter()
            .map(|belt| self.belt_minutes(*belt))
            .sum()
    }
}

/// Compute transit times from normalized speeds (Hz) and reference constants.
///
/// # Errors
/// - [`Error::Calibration`] when a reference constant is not finite and positive.
/// - [`Error::Division`] when a speed is not finite and positive. Speeds coming
///   through [`crate::units::normalize`] never trigger this.
pub fn compute_times(speeds_hz: [f64; BELT_COUNT], constants: &BeltConstants) -> Result<TransitTimes> {
    constants.validate()?;

    let mut seconds = [0.0; BELT_COUNT];
    for belt in BeltId::ALL {
        let f = speeds_hz[belt.index()];
        if !f.is_finite() || f <= 0.0 {
            return Err(Error::Division { belt });
        }
        seconds[belt.index()] = constants.get(belt) / f;
    }

    Ok(TransitTimes {
        seconds,
        total_seconds: seconds.iter().sum(),
    })
}
