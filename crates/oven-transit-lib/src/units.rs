//! Normalization of raw speed entries into Hz.

use crate::constants::{IHM_SCALE_FACTOR, IHM_SCALE_THRESHOLD};
use crate::error::{Error, Result};

/// Normalize a raw speed entry into Hz.
///
/// Values strictly above 200 are console readings scaled by 100 and are
/// divided back down; anything at or below 200 is already in Hz.
///
/// # Examples
/// ```
/// use oven_transit_lib::units::normalize;
///
/// assert_eq!(normalize(4000.0).unwrap(), 40.0);
/// assert_eq!(normalize(40.0).unwrap(), 40.0);
/// assert_eq!(normalize(200.0).unwrap(), 200.0);
/// assert!(normalize(0.0).is_err());
/// ```
pub fn normalize(raw: f64) -> Result<f64> {
    if !raw.is_finite() {
        return Err(Error::invalid_speed(raw, "speed must be finite"));
    }
    if raw <= 0.0 {
        return Err(Error::invalid_speed(raw, "speed must be greater than zero"));
    }

    if raw > IHM_SCALE_THRESHOLD {
        Ok(raw / IHM_SCALE_FACTOR)
    } else {
        Ok(raw)
    }
}

/// Parse a textual speed entry and normalize it.
///
/// Accepts surrounding whitespace and a comma as decimal separator.
pub fn parse_speed(text: &str) -> Result<f64> {
    normalize(parse_number(text)?)
}

/// Parse a decimal entry the way operators type it on the console.
pub fn parse_number(text: &str) -> Result<f64> {
    let cleaned = text.trim().replace(',', ".");
    if cleaned.is_empty() {
        return Err(Error::invalid_speed(text, "entry is empty"));
    }
    cleaned
        .parse::<f64>()
        .map_err(|err| Error::invalid_speed(text, err.to_string()))
}
