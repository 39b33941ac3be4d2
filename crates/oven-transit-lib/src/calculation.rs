//! One-shot calculation producing an immutable [`CalculationResult`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::belt::{BeltId, BELT_COUNT};
use crate::calibration::CalibrationConfig;
use crate::error::{Error, Result};
use crate::thickness::{compute_thickness, ThicknessProfile, ThicknessTrend};
use crate::time_model::{compute_times, TransitTimes};
use crate::units::{normalize, parse_number};

/// Raw operator entries for one calculation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedInput {
    /// Speed per belt as entered (Hz or console IHM×100 reading).
    pub raw: [f64; BELT_COUNT],
    /// Input layer thickness in cm, if known.
    pub h0_cm: Option<f64>,
}

impl SpeedInput {
    pub fn new(raw: [f64; BELT_COUNT], h0_cm: Option<f64>) -> Self {
        Self { raw, h0_cm }
    }

    /// Parse textual entries; an empty thickness entry means "not given".
    pub fn parse(raw: [&str; BELT_COUNT], h0: Option<&str>) -> Result<Self> {
        let mut values = [0.0; BELT_COUNT];
        for (value, text) in values.iter_mut().zip(raw) {
            *value = parse_number(text)?;
        }
        let h0_cm = match h0.map(str::trim) {
            None | Some("") => None,
            Some(text) => {
                let value = text
                    .replace(',', ".")
                    .parse::<f64>()
                    .map_err(|_| Error::InvalidThickness {
                        value: text.to_string(),
                    })?;
                Some(value)
            }
        };
        Ok(Self::new(values, h0_cm))
    }
}

/// Immutable snapshot of one calculation.
///
/// The same snapshot feeds text rendering, JSON output and CSV export, so
/// displayed and exported numbers never diverge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub input: SpeedInput,
    /// Normalized speeds in Hz.
    pub speeds_hz: [f64; BELT_COUNT],
    pub times: TransitTimes,
    pub thickness: ThicknessProfile,
}

impl CalculationResult {
    pub fn speed(&self, belt: BeltId) -> f64 {
        self.speeds_hz[belt.index()]
    }

    /// Target transit duration for a belt, in seconds.
    pub fn target_seconds(&self, belt: BeltId) -> f64 {
        self.times.belt_seconds(belt)
    }

    pub fn total_seconds(&self) -> f64 {
        self.times.total_seconds
    }

    pub fn trend_12(&self) -> ThicknessTrend {
        ThicknessTrend::classify(self.thickness.delta_12_pct)
    }

    pub fn trend_23(&self) -> ThicknessTrend {
        ThicknessTrend::classify(self.thickness.delta_23_pct)
    }
}

/// Validate the input, normalize speeds, and run both models.
///
/// Invalid speeds or thickness reject the whole request; no partial result
/// is produced. Unusable anchors only degrade the thickness indicator.
pub fn calculate(input: &SpeedInput, config: &CalibrationConfig) -> Result<CalculationResult> {
    let mut speeds_hz = [0.0; BELT_COUNT];
    for belt in BeltId::ALL {
        speeds_hz[belt.index()] = normalize(input.raw[belt.index()])?;
    }

    if let Some(h0) = input.h0_cm {
        if !h0.is_finite() || h0 < 0.0 {
            return Err(Error::InvalidThickness {
                value: h0.to_string(),
            });
        }
    }

    let times = compute_times(speeds_hz, &config.belt)?;

    let unusable = config.anchor.unusable_belts();
    if input.h0_cm.is_some() && !unusable.is_empty() {
        warn!(?unusable, "anchor constants unusable; thickness indicator degraded");
    }
    let thickness = compute_thickness(speeds_hz, &config.anchor, input.h0_cm);

    debug!(
        f1 = speeds_hz[0],
        f2 = speeds_hz[1],
        f3 = speeds_hz[2],
        total_s = times.total_seconds,
        "calculated transit times"
    );

    Ok(CalculationResult {
        input: *input,
        speeds_hz,
        times,
        thickness,
    })
}
