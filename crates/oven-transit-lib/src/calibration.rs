//! Reference and anchor constant tables.
//!
//! [`BeltConstants`] hold the maintenance reference `K_i` (s·Hz) that drive
//! the time model. [`AnchorConstants`] hold the user-overridable `K'_i`
//! (min·Hz) used only by the thickness indicator. Both are plain values
//! bundled in a [`CalibrationConfig`] and passed into each calculation.

use serde::{Deserialize, Serialize};

use crate::belt::{BeltId, BELT_COUNT};
use crate::constants::{CONVEYING_LENGTH_M, DEFAULT_ANCHOR, REFERENCE_COEFFICIENT};
use crate::error::{Error, Result};

/// Per-belt time constants `K_i = Lconv_i × C_i` in s·Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeltConstants {
    values: [f64; BELT_COUNT],
}

impl BeltConstants {
    /// Build the table from the maintenance reference lengths and coefficients.
    pub fn reference() -> Self {
        let mut values = [0.0; BELT_COUNT];
        for (i, value) in values.iter_mut().enumerate() {
            *value = CONVEYING_LENGTH_M[i] * REFERENCE_COEFFICIENT[i];
        }
        Self { values }
    }

    /// Build a table from explicit constants. Values are validated on use.
    pub const fn new(values: [f64; BELT_COUNT]) -> Self {
        Self { values }
    }

    /// Constant for one belt.
    pub fn get(&self, belt: BeltId) -> f64 {
        self.values[belt.index()]
    }

    /// Ensure every constant is finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        for belt in BeltId::ALL {
            let value = self.get(belt);
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Calibration {
                    belt,
                    message: format!("reference constant must be finite and positive, got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for BeltConstants {
    fn default() -> Self {
        Self::reference()
    }
}

/// Per-belt anchor constants `K'_i` in min·Hz.
///
/// A belt without a usable anchor (unset or non-positive) degrades the
/// thickness indicator for that belt instead of failing the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorConstants {
    values: [Option<f64>; BELT_COUNT],
}

impl AnchorConstants {
    /// Built-in anchors.
    pub fn builtin() -> Self {
        Self {
            values: DEFAULT_ANCHOR.map(Some),
        }
    }

    /// Raw anchor for a belt, whether usable or not.
    pub fn get(&self, belt: BeltId) -> Option<f64> {
        self.values[belt.index()]
    }

    /// Anchor for a belt only if it is finite and strictly positive.
    pub fn usable(&self, belt: BeltId) -> Option<f64> {
        self.get(belt).filter(|k| k.is_finite() && *k > 0.0)
    }

    pub fn set(&mut self, belt: BeltId, value: Option<f64>) {
        self.values[belt.index()] = value;
    }

    /// Belts whose anchor cannot be used, in belt order.
    pub fn unusable_belts(&self) -> Vec<BeltId> {
        BeltId::ALL
            .into_iter()
            .filter(|belt| self.usable(*belt).is_none())
            .collect()
    }
}

impl Default for AnchorConstants {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Configuration value handed to every calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalibrationConfig {
    pub belt: BeltConstants,
    pub anchor: AnchorConstants,
}

impl CalibrationConfig {
    pub fn new(belt: BeltConstants, anchor: AnchorConstants) -> Self {
        Self { belt, anchor }
    }

    /// Reference belt constants with the given anchors.
    pub fn with_anchor(anchor: AnchorConstants) -> Self {
        Self {
            belt: BeltConstants::reference(),
            anchor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_constants_match_maintenance_table() {
        let k = BeltConstants::reference();
        assert!((k.get(BeltId::Belt1) - 152_817.732).abs() < 1e-2);
        assert!((k.get(BeltId::Belt2) - 107_126.244).abs() < 1e-2);
        assert!((k.get(BeltId::Belt3) - 590_490.06).abs() < 1e-1);
        assert!(k.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_constant() {
        let k = BeltConstants::new([1.0, 0.0, 1.0]);
        match k.validate() {
            Err(Error::Calibration { belt, .. }) => assert_eq!(belt, BeltId::Belt2),
            other => panic!("expected calibration error, got {other:?}"),
        }
        assert!(BeltConstants::new([1.0, 1.0, f64::NAN]).validate().is_err());
    }

    #[test]
    fn unusable_anchors_are_reported() {
        let mut anchors = AnchorConstants::builtin();
        assert!(anchors.unusable_belts().is_empty());
        anchors.set(BeltId::Belt2, Some(-3.0));
        anchors.set(BeltId::Belt3, None);
        assert_eq!(anchors.unusable_belts(), vec![BeltId::Belt2, BeltId::Belt3]);
        assert_eq!(anchors.usable(BeltId::Belt1), Some(1_000.0));
    }
}
