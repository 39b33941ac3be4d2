//! Calibration plus timeline, with configuration changes gated on state.

use tracing::info;

use crate::calculation::{calculate, CalculationResult, SpeedInput};
use crate::calibration::CalibrationConfig;
use crate::error::{Error, Result};
use crate::timeline::{SimulationTimeline, TimelineState};

/// One operator session: the active calibration and the simulation it drives.
#[derive(Debug, Clone, Default)]
pub struct Session {
    calibration: CalibrationConfig,
    timeline: SimulationTimeline,
}

impl Session {
    pub fn new(calibration: CalibrationConfig) -> Self {
        Self {
            calibration,
            timeline: SimulationTimeline::new(),
        }
    }

    pub fn calibration(&self) -> &CalibrationConfig {
        &self.calibration
    }

    pub fn timeline(&self) -> &SimulationTimeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut SimulationTimeline {
        &mut self.timeline
    }

    /// Run a calculation and load it into the timeline.
    ///
    /// On error the previously loaded calculation and timeline are untouched.
    pub fn calculate(&mut self, input: &SpeedInput) -> Result<CalculationResult> {
        let result = calculate(input, &self.calibration)?;
        self.timeline.calculate(result.clone());
        Ok(result)
    }

    /// Swap the calibration tables. Only allowed between runs.
    pub fn reload_calibration(&mut self, calibration: CalibrationConfig) -> Result<()> {
        match self.timeline.state() {
            TimelineState::Running | TimelineState::Paused => Err(Error::CalibrationLocked {
                state: self.timeline.state().to_string(),
            }),
            _ => {
                info!("calibration reloaded");
                self.calibration = calibration;
                Ok(())
            }
        }
    }
}
