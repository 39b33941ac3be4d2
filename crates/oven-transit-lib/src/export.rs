//! CSV export of a [`CalculationResult`].
//!
//! One `key;value` row per figure, no header. Figures that could not be
//! derived are written as empty fields.

use std::io::Write;

use csv::WriterBuilder;

use crate::belt::BeltId;
use crate::calculation::CalculationResult;
use crate::error::Result;

/// Keys in export order.
pub const CSV_KEYS: [&str; 17] = [
    "f1_hz",
    "f2_hz",
    "f3_hz",
    "t1_s",
    "t2_s",
    "t3_s",
    "total_s",
    "t1_min",
    "t2_min",
    "t3_min",
    "total_min",
    "h0_cm",
    "h1_cm",
    "h2_cm",
    "h3_cm",
    "delta12_pct",
    "delta23_pct",
];

/// Flatten a result into `(key, value)` pairs in [`CSV_KEYS`] order.
pub fn rows(result: &CalculationResult) -> Vec<(&'static str, Option<f64>)> {
    let times = &result.times;
    let thickness = &result.thickness;
    let [b1, b2, b3] = BeltId::ALL;
    let values = [
        Some(result.speed(b1)),
        Some(result.speed(b2)),
        Some(result.speed(b3)),
        Some(times.belt_seconds(b1)),
        Some(times.belt_seconds(b2)),
        Some(times.belt_seconds(b3)),
        Some(times.total_seconds),
        Some(times.belt_minutes(b1)),
        Some(times.belt_minutes(b2)),
        Some(times.belt_minutes(b3)),
        Some(times.total_minutes()),
        result.input.h0_cm,
        thickness.height(b1),
        thickness.height(b2),
        thickness.height(b3),
        thickness.delta_12_pct,
        thickness.delta_23_pct,
    ];
    CSV_KEYS.into_iter().zip(values).collect()
}

/// Write the result as `;`-delimited rows.
pub fn write_csv<W: Write>(result: &CalculationResult, writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);
    for (key, value) in rows(result) {
        let field = value.map(|v| v.to_string()).unwrap_or_default();
        csv_writer.write_record([key, field.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render the result as a CSV string.
pub fn to_csv_string(result: &CalculationResult) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(result, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{calculate, SpeedInput};
    use crate::calibration::CalibrationConfig;

    #[test]
    fn writes_every_key_in_order() {
        let result = calculate(
            &SpeedInput::new([4000.0, 5000.0, 9000.0], Some(2.0)),
            &CalibrationConfig::default(),
        )
        .unwrap();
        let text = to_csv_string(&result).unwrap();
        let keys: Vec<&str> = text
            .lines()
            .map(|line| line.split(';').next().unwrap_or_default())
            .collect();
        assert_eq!(keys, CSV_KEYS.to_vec());
        assert!(text.starts_with("f1_hz;40\n"));
        assert!(text.contains("h0_cm;2\n"));
    }

    #[test]
    fn missing_thickness_leaves_fields_empty() {
        let result = calculate(
            &SpeedInput::new([40.0, 50.0, 90.0], None),
            &CalibrationConfig::default(),
        )
        .unwrap();
        let text = to_csv_string(&result).unwrap();
        assert!(text.contains("h0_cm;\n"));
        assert!(text.contains("delta23_pct;\n"));
        assert!(!text.contains("t1_s;\n"));
    }
}
