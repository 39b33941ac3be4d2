//! Physical layout of each belt and a per-segment split of its transit time.
//!
//! The belt moves at a constant speed, so time spent on a segment is
//! proportional to its length: `s_per_m = t_belt / convoy_m`.

use serde::Serialize;

use crate::belt::{BeltId, BELT_COUNT};
use crate::error::{Error, Result};

/// Heating cells along the whole oven, numbered from the entry.
pub const HEATING_CELL_COUNT: usize = 9;

const CELLS_PER_BELT: usize = 3;

/// Segment lengths of one belt, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeltGeometry {
    /// Unheated stretch before the first cell.
    pub pre_cm: f64,
    /// Heated cell lengths, upstream first.
    pub cells_cm: &'static [f64],
    /// Stretch after the last cell, up to the next belt or the exit.
    pub transfer_cm: f64,
    /// Conveying length the reference constants were measured over.
    pub convoy_cm: f64,
}

const GEOMETRY: [BeltGeometry; BELT_COUNT] = [
    BeltGeometry {
        pre_cm: 115.0,
        cells_cm: &[240.0, 240.0, 244.0],
        transfer_cm: 310.0,
        convoy_cm: 1148.5,
    },
    BeltGeometry {
        pre_cm: 100.0,
        cells_cm: &[240.0, 240.0, 244.0],
        transfer_cm: 345.0,
        convoy_cm: 1168.5,
    },
    BeltGeometry {
        pre_cm: 80.0,
        cells_cm: &[240.0, 240.0],
        transfer_cm: 138.0,
        convoy_cm: 698.0,
    },
];

impl BeltGeometry {
    pub fn of(belt: BeltId) -> &'static BeltGeometry {
        &GEOMETRY[belt.index()]
    }

    /// Total heated length in centimetres.
    pub fn heating_cm(&self) -> f64 {
        self.cells_cm.iter().sum()
    }

    /// Sum of every segment; close to, but not exactly, `convoy_cm`.
    pub fn segments_cm(&self) -> f64 {
        self.pre_cm + self.heating_cm() + self.transfer_cm
    }
}

/// Belt carrying a heating cell numbered `1..=9` from the oven entry.
pub fn belt_for_cell(cell: usize) -> Result<BeltId> {
    if cell == 0 || cell > HEATING_CELL_COUNT {
        return Err(Error::UnknownBelt {
            name: format!("heating cell {cell}"),
        });
    }
    BeltId::from_index((cell - 1) / CELLS_PER_BELT)
}

/// Time spent in one heated cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellTime {
    /// Oven-wide cell number.
    pub cell: usize,
    pub seconds: f64,
}

/// A belt's transit time split across its segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentBreakdown {
    pub belt: BeltId,
    pub seconds_per_metre: f64,
    pub pre_s: f64,
    pub cells: Vec<CellTime>,
    pub transfer_s: f64,
    pub heating_s: f64,
    /// Transit time the breakdown was computed from.
    pub convoy_s: f64,
    /// `pre + heating + transfer`, kept as a consistency check against `convoy_s`.
    pub rebuilt_s: f64,
}

/// Split `convoy_s` seconds over the segments of `belt`.
pub fn breakdown(belt: BeltId, convoy_s: f64) -> Result<SegmentBreakdown> {
    if !convoy_s.is_finite() || convoy_s < 0.0 {
        return Err(Error::Calibration {
            belt,
            message: format!("transit time must be finite and non-negative, got {convoy_s}"),
        });
    }

    let geometry = BeltGeometry::of(belt);
    let seconds_per_metre = convoy_s / (geometry.convoy_cm / 100.0);
    let segment = |cm: f64| seconds_per_metre * cm / 100.0;

    let first_cell = belt.index() * CELLS_PER_BELT + 1;
    let cells: Vec<CellTime> = geometry
        .cells_cm
        .iter()
        .enumerate()
        .map(|(offset, cm)| CellTime {
            cell: first_cell + offset,
            seconds: segment(*cm),
        })
        .collect();

    let pre_s = segment(geometry.pre_cm);
    let transfer_s = segment(geometry.transfer_cm);
    let heating_s: f64 = cells.iter().map(|c| c.seconds).sum();

    Ok(SegmentBreakdown {
        belt,
        seconds_per_metre,
        pre_s,
        cells,
        transfer_s,
        heating_s,
        convoy_s,
        rebuilt_s: segment(geometry.segments_cm()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_map_to_belts() {
        assert_eq!(belt_for_cell(1).unwrap(), BeltId::Belt1);
        assert_eq!(belt_for_cell(3).unwrap(), BeltId::Belt1);
        assert_eq!(belt_for_cell(4).unwrap(), BeltId::Belt2);
        assert_eq!(belt_for_cell(9).unwrap(), BeltId::Belt3);
        assert!(belt_for_cell(0).is_err());
        assert!(belt_for_cell(10).is_err());
    }

    #[test]
    fn breakdown_scales_with_length() {
        let split = breakdown(BeltId::Belt1, 1148.5).unwrap();
        assert!((split.seconds_per_metre - 100.0).abs() < 1e-9);
        assert!((split.pre_s - 115.0).abs() < 1e-9);
        assert!((split.heating_s - 724.0).abs() < 1e-9);
        assert!((split.rebuilt_s - 1149.0).abs() < 1e-9);
        assert_eq!(split.cells.len(), 3);
        assert_eq!(split.cells[0].cell, 1);
    }

    #[test]
    fn segments_add_up_close_to_conveying_length() {
        assert!((BeltGeometry::of(BeltId::Belt1).segments_cm() - 1149.0).abs() < 1e-9);
        assert!((BeltGeometry::of(BeltId::Belt2).segments_cm() - 1169.0).abs() < 1e-9);
        assert!((BeltGeometry::of(BeltId::Belt3).segments_cm() - 698.0).abs() < 1e-9);
    }

    #[test]
    fn belt_three_numbers_cells_from_seven() {
        let split = breakdown(BeltId::Belt3, 698.0).unwrap();
        let numbers: Vec<usize> = split.cells.iter().map(|c| c.cell).collect();
        assert_eq!(numbers, vec![7, 8]);
        assert!((split.transfer_s - 138.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_negative_time() {
        assert!(breakdown(BeltId::Belt2, -1.0).is_err());
        assert!(breakdown(BeltId::Belt2, f64::NAN).is_err());
    }
}
