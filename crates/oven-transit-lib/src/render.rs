//! Read model handed to bar-rendering collaborators.
//!
//! Renderers only ever see [`BeltSnapshot`] values, never the timeline
//! itself, so presentation cannot influence simulation state.

use serde::Serialize;

use crate::belt::BeltId;
use crate::timeline::{BeltStatus, GapSpan};

/// Everything needed to draw one belt's progress bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeltSnapshot {
    pub belt: BeltId,
    /// Progress fraction in `[0, 1]`.
    pub fraction: f64,
    /// Cell reference point in `0..=9`.
    pub cell_marker: usize,
    pub status: BeltStatus,
    pub elapsed_s: f64,
    pub target_s: f64,
    /// Holes to draw, in bar fractions, ordered by opening time.
    pub gaps: Vec<GapSpan>,
}

impl BeltSnapshot {
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Stateless adapter turning snapshots into a presentation format.
pub trait BarRenderer {
    type Output;

    fn render_bar(&self, snapshot: &BeltSnapshot) -> Self::Output;

    fn render_all(&self, snapshots: &[BeltSnapshot]) -> Vec<Self::Output> {
        snapshots.iter().map(|s| self.render_bar(s)).collect()
    }
}
