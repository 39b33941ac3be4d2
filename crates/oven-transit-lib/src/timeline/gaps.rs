//! Feed-interruption bookkeeping for a single belt.
//!
//! A gap freezes the belt's progress, so its position on the bar is the
//! progress reached when it opened. Its length is the simulation-clock time
//! it stayed open. The clock only moves while the timeline runs, so time
//! spent globally paused never counts towards a gap.

use serde::{Deserialize, Serialize};

/// One recorded feed interruption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapInterval {
    /// Belt progress (seconds) when the gap opened.
    pub at_progress: f64,
    /// Simulation clock (seconds) when the gap opened.
    pub opened_clock: f64,
    /// Simulation clock (seconds) when the gap closed, `None` while open.
    pub closed_clock: Option<f64>,
}

impl GapInterval {
    pub fn is_open(&self) -> bool {
        self.closed_clock.is_none()
    }

    /// Seconds the gap has been held, measuring open gaps up to `now`.
    pub fn held(&self, now: f64) -> f64 {
        let end = self.closed_clock.unwrap_or(now);
        (end - self.opened_clock).max(0.0)
    }
}

/// Hole drawn on a progress bar, as fractions of the bar length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapSpan {
    pub start: f64,
    pub end: f64,
    pub open: bool,
}

impl GapSpan {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Ordered, non-overlapping gaps for one belt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapTracker {
    intervals: Vec<GapInterval>,
}

impl GapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intervals(&self) -> &[GapInterval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.intervals.last().is_some_and(GapInterval::is_open)
    }

    /// Open a gap. Returns `false` without recording anything if one is already open.
    pub fn open(&mut self, at_progress: f64, clock: f64) -> bool {
        if self.is_open() {
            return false;
        }
        self.intervals.push(GapInterval {
            at_progress,
            opened_clock: clock,
            closed_clock: None,
        });
        true
    }

    /// Close the open gap, returning it. Returns `None` if no gap is open.
    pub fn close(&mut self, clock: f64) -> Option<GapInterval> {
        let last = self.intervals.last_mut().filter(|gap| gap.is_open())?;
        last.closed_clock = Some(clock.max(last.opened_clock));
        Some(*last)
    }

    /// Total seconds held across every gap, measuring an open gap up to `now`.
    pub fn total_held(&self, now: f64) -> f64 {
        self.intervals.iter().map(|gap| gap.held(now)).sum()
    }

    /// Bar holes for a belt with the given target duration.
    pub fn spans(&self, target: f64, now: f64) -> Vec<GapSpan> {
        if target <= 0.0 {
            return Vec::new();
        }
        self.intervals
            .iter()
            .map(|gap| {
                let start = (gap.at_progress / target).clamp(0.0, 1.0);
                let end = ((gap.at_progress + gap.held(now)) / target).clamp(start, 1.0);
                GapSpan {
                    start,
                    end,
                    open: gap.is_open(),
                }
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.intervals.clear();
    }
}
