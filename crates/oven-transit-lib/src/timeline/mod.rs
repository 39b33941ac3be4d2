//! Tick-driven simulation of product progress through the three belts.
//!
//! The timeline never reads a clock. A tick source (timer loop, test, CLI)
//! calls [`SimulationTimeline::advance`] with the elapsed seconds and the
//! timeline updates every belt independently. Each belt models the fraction
//! of its own transit elapsed since the run started; belts do not hand off
//! to one another.

mod gaps;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::belt::{BeltId, BELT_COUNT};
use crate::calculation::CalculationResult;
use crate::constants::{CELL_MARKER_DIVISIONS, EXIT_NOTICE_SECONDS};
use crate::error::{Error, Result};
use crate::render::BeltSnapshot;

pub use gaps::{GapInterval, GapSpan, GapTracker};

/// Lifecycle of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineState {
    /// No calculation loaded.
    #[default]
    Idle,
    /// Targets loaded, no progress yet.
    Ready,
    Running,
    Paused,
    /// Every belt reached its target.
    Completed,
}

impl fmt::Display for TimelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimelineState::Idle => "idle",
            TimelineState::Ready => "ready",
            TimelineState::Running => "running",
            TimelineState::Paused => "paused",
            TimelineState::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// Per-belt status as shown next to each progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeltStatus {
    Waiting,
    Active,
    Paused,
    /// Feed interrupted: a gap is open on this belt.
    Held,
    Done,
}

impl BeltStatus {
    pub fn label(self) -> &'static str {
        match self {
            BeltStatus::Waiting => "waiting",
            BeltStatus::Active => "running",
            BeltStatus::Paused => "paused",
            BeltStatus::Held => "feed stopped",
            BeltStatus::Done => "done",
        }
    }
}

/// Events raised by a single [`SimulationTimeline::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineNotice {
    /// A belt reached its target duration.
    BeltCompleted { belt: BeltId, clock_s: f64 },
    /// Product leaves the oven within the exit-notice window.
    ExitImminent { remaining_s: f64 },
    /// Every belt reached its target.
    Completed { clock_s: f64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
struct BeltTrack {
    target: f64,
    elapsed: f64,
    gaps: GapTracker,
}

impl BeltTrack {
    fn is_done(&self) -> bool {
        self.target > 0.0 && self.elapsed >= self.target
    }

    fn remaining(&self) -> f64 {
        (self.target - self.elapsed).max(0.0)
    }
}

/// Mutable simulation state for one calculation.
#[derive(Debug, Clone, Default)]
pub struct SimulationTimeline {
    state: TimelineState,
    result: Option<CalculationResult>,
    belts: [BeltTrack; BELT_COUNT],
    clock: f64,
    exit_notified: bool,
}

impl SimulationTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    /// Calculation currently loaded, if any.
    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    /// Simulation clock: total seconds advanced while running.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Load target durations from a calculation. Valid from any state.
    pub fn calculate(&mut self, result: CalculationResult) {
        for belt in BeltId::ALL {
            self.belts[belt.index()] = BeltTrack {
                target: result.target_seconds(belt),
                ..BeltTrack::default()
            };
        }
        self.result = Some(result);
        self.clock = 0.0;
        self.exit_notified = false;
        self.transition(TimelineState::Ready);
    }

    /// Discard progress and gaps. Returns to `Ready` if a calculation is loaded, else `Idle`.
    pub fn reset(&mut self) {
        for track in &mut self.belts {
            track.elapsed = 0.0;
            track.gaps.clear();
        }
        self.clock = 0.0;
        self.exit_notified = false;
        let next = if self.result.is_some() {
            TimelineState::Ready
        } else {
            TimelineState::Idle
        };
        self.transition(next);
    }

    /// Start from `Ready`, or resume from `Paused`.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            TimelineState::Ready | TimelineState::Paused => {
                self.transition(TimelineState::Running);
                Ok(())
            }
            _ => Err(self.reject("start")),
        }
    }

    /// Resume a paused run.
    pub fn resume(&mut self) -> Result<()> {
        if self.state != TimelineState::Paused {
            return Err(self.reject("resume"));
        }
        self.start()
    }

    /// Freeze progress on every belt.
    pub fn pause(&mut self) -> Result<()> {
        if self.state != TimelineState::Running {
            return Err(self.reject("pause"));
        }
        self.transition(TimelineState::Paused);
        Ok(())
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Belts without an open gap accrue `dt`, clamped to their target. While
    /// paused or completed this is a no-op. Calling it before `start` is an
    /// [`Error::InvalidTransition`].
    pub fn advance(&mut self, dt: f64) -> Result<Vec<TimelineNotice>> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(Error::InvalidTick { dt });
        }
        match self.state {
            TimelineState::Running => {}
            TimelineState::Paused | TimelineState::Completed => return Ok(Vec::new()),
            TimelineState::Idle | TimelineState::Ready => return Err(self.reject("advance")),
        }

        self.clock += dt;
        let mut notices = Vec::new();

        for belt in BeltId::ALL {
            let track = &mut self.belts[belt.index()];
            if track.is_done() || track.gaps.is_open() {
                continue;
            }
            track.elapsed = (track.elapsed + dt).min(track.target);
            if track.is_done() {
                debug!(%belt, clock_s = self.clock, "belt reached target");
                notices.push(TimelineNotice::BeltCompleted {
                    belt,
                    clock_s: self.clock,
                });
            }
        }

        let longest_target = self.belts.iter().map(|t| t.target).fold(0.0, f64::max);
        let remaining = self.belts.iter().map(BeltTrack::remaining).fold(0.0, f64::max);
        if !self.exit_notified
            && longest_target > EXIT_NOTICE_SECONDS
            && remaining > 0.0
            && remaining <= EXIT_NOTICE_SECONDS
        {
            self.exit_notified = true;
            notices.push(TimelineNotice::ExitImminent {
                remaining_s: remaining,
            });
        }

        if self.belts.iter().all(BeltTrack::is_done) {
            self.transition(TimelineState::Completed);
            notices.push(TimelineNotice::Completed {
                clock_s: self.clock,
            });
        }

        Ok(notices)
    }

    /// Record a feed stop on one belt. No-op if a gap is already open there.
    pub fn open_gap(&mut self, belt: BeltId) -> Result<()> {
        if !matches!(self.state, TimelineState::Running | TimelineState::Paused) {
            return Err(self.reject("open a gap"));
        }
        let clock = self.clock;
        let track = &mut self.belts[belt.index()];
        if track.is_done() {
            warn!(%belt, "feed stop ignored: belt already completed");
            return Err(Error::InvalidTransition {
                operation: "open a gap",
                state: format!("{} ({belt} completed)", self.state),
            });
        }
        if track.gaps.open(track.elapsed, clock) {
            debug!(%belt, at_progress = track.elapsed, clock_s = clock, "gap opened");
        }
        Ok(())
    }

    /// Record a feed resume on one belt.
    pub fn close_gap(&mut self, belt: BeltId) -> Result<()> {
        if !matches!(self.state, TimelineState::Running | TimelineState::Paused) {
            return Err(self.reject("close a gap"));
        }
        let clock = self.clock;
        let state = self.state;
        let track = &mut self.belts[belt.index()];
        match track.gaps.close(clock) {
            Some(gap) => {
                debug!(%belt, held_s = gap.held(clock), "gap closed");
                Ok(())
            }
            None => {
                warn!(%belt, "feed resume ignored: no open gap");
                Err(Error::InvalidTransition {
                    operation: "close a gap",
                    state: format!("{state} (no open gap on {belt})"),
                })
            }
        }
    }

    /// Fraction of the belt's target elapsed, in `[0, 1]`.
    pub fn progress_fraction(&self, belt: BeltId) -> f64 {
        let track = &self.belts[belt.index()];
        if track.target <= 0.0 {
            return 0.0;
        }
        (track.elapsed / track.target).clamp(0.0, 1.0)
    }

    /// Discrete cell reference point, `floor(fraction × 9)`, in `0..=9`.
    pub fn cell_marker(&self, belt: BeltId) -> usize {
        let marker = (self.progress_fraction(belt) * CELL_MARKER_DIVISIONS as f64).floor();
        (marker as usize).min(CELL_MARKER_DIVISIONS)
    }

    /// Progress in seconds on a belt.
    pub fn elapsed(&self, belt: BeltId) -> f64 {
        self.belts[belt.index()].elapsed
    }

    /// Target duration in seconds on a belt, zero when idle.
    pub fn target(&self, belt: BeltId) -> f64 {
        self.belts[belt.index()].target
    }

    pub fn remaining(&self, belt: BeltId) -> f64 {
        self.belts[belt.index()].remaining()
    }

    pub fn gaps(&self, belt: BeltId) -> &[GapInterval] {
        self.belts[belt.index()].gaps.intervals()
    }

    pub fn has_open_gap(&self, belt: BeltId) -> bool {
        self.belts[belt.index()].gaps.is_open()
    }

    /// Total seconds this belt has been held by feed stops.
    pub fn held(&self, belt: BeltId) -> f64 {
        self.belts[belt.index()].gaps.total_held(self.clock)
    }

    pub fn belt_status(&self, belt: BeltId) -> BeltStatus {
        let track = &self.belts[belt.index()];
        if track.is_done() {
            BeltStatus::Done
        } else if self.has_open_gap(belt) {
            BeltStatus::Held
        } else {
            match self.state {
                TimelineState::Running => BeltStatus::Active,
                TimelineState::Paused => BeltStatus::Paused,
                _ => BeltStatus::Waiting,
            }
        }
    }

    /// Read-only view of one belt for rendering collaborators.
    pub fn snapshot(&self, belt: BeltId) -> BeltSnapshot {
        let track = &self.belts[belt.index()];
        BeltSnapshot {
            belt,
            fraction: self.progress_fraction(belt),
            cell_marker: self.cell_marker(belt),
            status: self.belt_status(belt),
            elapsed_s: track.elapsed,
            target_s: track.target,
            gaps: track.gaps.spans(track.target, self.clock),
        }
    }

    /// Snapshots of every belt in order.
    pub fn snapshots(&self) -> [BeltSnapshot; BELT_COUNT] {
        BeltId::ALL.map(|belt| self.snapshot(belt))
    }

    fn transition(&mut self, next: TimelineState) {
        if self.state != next {
            debug!(from = %self.state, to = %next, "timeline transition");
        }
        self.state = next;
    }

    fn reject(&self, operation: &'static str) -> Error {
        warn!(operation, state = %self.state, "rejected timeline operation");
        Error::InvalidTransition {
            operation,
            state: self.state.to_string(),
        }
    }
}
