//! Relative layer-thickness indicator.
//!
//! Product is spread on each belt in proportion to how fast that belt runs
//! relative to its anchor constant: `u_i = f_i / K'_i`. Slower downstream
//! belts pile product up, faster ones thin it out. The indicator never feeds
//! back into the time model.

use serde::{Deserialize, Serialize};

use crate::belt::{BeltId, BELT_COUNT};
use crate::calibration::AnchorConstants;
use crate::constants::THICKNESS_STEADY_BAND_PCT;

/// Layer thickness per belt and relative variation between belts.
///
/// Every field is `None` when the input thickness was not given, and
/// individual fields are `None` when an anchor needed to derive them is
/// unusable.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThicknessProfile {
    /// Thickness per belt, in cm.
    pub heights_cm: [Option<f64>; BELT_COUNT],
    /// Variation from belt 1 to belt 2, in percent.
    pub delta_12_pct: Option<f64>,
    /// Variation from belt 2 to belt 3, in percent.
    pub delta_23_pct: Option<f64>,
}

impl ThicknessProfile {
    /// Profile with every output unavailable.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn height(&self, belt: BeltId) -> Option<f64> {
        self.heights_cm[belt.index()]
    }

    pub fn is_available(&self) -> bool {
        self.heights_cm.iter().any(Option::is_some)
    }
}

/// Qualitative reading of a thickness variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThicknessTrend {
    Accumulating,
    Steady,
    Thinning,
    Unavailable,
}

impl ThicknessTrend {
    pub fn classify(delta_pct: Option<f64>) -> Self {
        match delta_pct {
            Some(d) if d > THICKNESS_STEADY_BAND_PCT => ThicknessTrend::Accumulating,
            Some(d) if d < -THICKNESS_STEADY_BAND_PCT => ThicknessTrend::Thinning,
            Some(d) if d.is_finite() => ThicknessTrend::Steady,
            _ => ThicknessTrend::Unavailable,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThicknessTrend::Accumulating => "accumulating",
            ThicknessTrend::Steady => "steady",
            ThicknessTrend::Thinning => "thinning",
            ThicknessTrend::Unavailable => "unavailable",
        }
    }
}

/// Compute the thickness profile from normalized speeds and anchor constants.
///
/// Returns [`ThicknessProfile::unavailable`] when `h0_cm` is `None`.
pub fn compute_thickness(
    speeds_hz: [f64; BELT_COUNT],
    anchors: &AnchorConstants,
    h0_cm: Option<f64>,
) -> ThicknessProfile {
    let Some(h0) = h0_cm else {
        return ThicknessProfile::unavailable();
    };

    let u: [Option<f64>; BELT_COUNT] = BeltId::ALL.map(|belt| {
        anchors
            .usable(belt)
            .map(|k| speeds_hz[belt.index()] / k)
            .filter(|u| u.is_finite())
    });

    let ratio = |num: Option<f64>, den: Option<f64>| match (num, den) {
        (Some(n), Some(d)) if d > 0.0 => Some(n / d),
        _ => None,
    };

    let r12 = ratio(u[0], u[1]);
    let r13 = ratio(u[0], u[2]);
    let r23 = ratio(u[1], u[2]);

    ThicknessProfile {
        heights_cm: [Some(h0), r12.map(|r| h0 * r), r13.map(|r| h0 * r)],
        delta_12_pct: r12.map(|r| (r - 1.0) * 100.0),
        delta_23_pct: r23.map(|r| (r - 1.0) * 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEEDS: [f64; BELT_COUNT] = [40.0, 50.0, 90.0];

    #[test]
    fn reference_scenario_profile() {
        let profile = compute_thickness(SPEEDS, &AnchorConstants::builtin(), Some(2.0));
        assert_eq!(profile.height(BeltId::Belt1), Some(2.0));
        assert!((profile.height(BeltId::Belt2).unwrap() - 5.47).abs() < 0.03);
        assert!((profile.height(BeltId::Belt3).unwrap() - 8.39).abs() < 0.04);
        assert!((profile.delta_12_pct.unwrap() - 174.0).abs() < 1.0);
        assert!((profile.delta_23_pct.unwrap() - 53.0).abs() < 1.0);
    }

    #[test]
    fn missing_input_thickness_skips_everything() {
        let profile = compute_thickness(SPEEDS, &AnchorConstants::builtin(), None);
        assert_eq!(profile, ThicknessProfile::unavailable());
        assert!(!profile.is_available());
    }

    #[test]
    fn bad_middle_anchor_only_hides_dependent_values() {
        let mut anchors = AnchorConstants::builtin();
        anchors.set(BeltId::Belt2, Some(0.0));
        let profile = compute_thickness(SPEEDS, &anchors, Some(2.0));
        assert_eq!(profile.height(BeltId::Belt1), Some(2.0));
        assert_eq!(profile.height(BeltId::Belt2), None);
        assert_eq!(profile.delta_12_pct, None);
        assert_eq!(profile.delta_23_pct, None);
        assert!((profile.height(BeltId::Belt3).unwrap() - 8.39).abs() < 0.04);
    }

    #[test]
    fn trend_uses_half_percent_band() {
        assert_eq!(ThicknessTrend::classify(Some(174.0)), ThicknessTrend::Accumulating);
        assert_eq!(ThicknessTrend::classify(Some(0.4)), ThicknessTrend::Steady);
        assert_eq!(ThicknessTrend::classify(Some(-0.6)), ThicknessTrend::Thinning);
        assert_eq!(ThicknessTrend::classify(None), ThicknessTrend::Unavailable);
    }
}
