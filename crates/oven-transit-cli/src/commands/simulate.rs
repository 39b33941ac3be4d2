//! `simulate` command: drive the timeline with a tick loop.
//!
//! The loop keeps its own driver clock that advances by one tick per
//! iteration whether or not the timeline is running. Scheduled feed stops
//! and pauses fire against that driver clock, which lets a pause window
//! be expressed even though the simulation clock is frozen during it.

use std::str::FromStr;
use std::thread;
use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use oven_transit_lib::constants::DEFAULT_TICK_SECONDS;
use oven_transit_lib::{
    BarRenderer, BeltId, BeltSnapshot, Session, SimulationTimeline, TimelineNotice, TimelineState,
};

use super::{CliContext, SpeedArgs};
use crate::output::{format_notice, render_json, OutputFormat, TextBarRenderer};
use crate::terminal::BarGlyphs;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub speeds: SpeedArgs,
    /// Seconds advanced per tick.
    #[arg(long, default_value_t = DEFAULT_TICK_SECONDS)]
    pub tick: f64,
    /// Sleep one tick of wall-clock time between iterations.
    #[arg(long)]
    pub realtime: bool,
    /// Stop after this many ticks even if the run has not completed.
    #[arg(long)]
    pub max_ticks: Option<u64>,
    /// Feed stop on a belt, as `<belt>:<open_at_s>:<close_at_s>`. Repeatable.
    #[arg(long = "gap", value_name = "BELT:OPEN:CLOSE")]
    pub gaps: Vec<GapSchedule>,
    /// Global pause window, as `<pause_at_s>:<resume_at_s>`.
    #[arg(long = "pause-at", value_name = "PAUSE:RESUME")]
    pub pause: Option<PauseSchedule>,
    /// Output format (text or json).
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// A feed stop scheduled on the driver clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapSchedule {
    pub belt: BeltId,
    pub open_at: f64,
    pub close_at: f64,
}

impl FromStr for GapSchedule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [belt, open, close] = parts.as_slice() else {
            return Err(format!("expected <belt>:<open_at_s>:<close_at_s>, got {s:?}"));
        };
        let belt = belt.parse::<BeltId>().map_err(|err| err.to_string())?;
        let open_at = parse_seconds(open)?;
        let close_at = parse_seconds(close)?;
        if close_at <= open_at {
            return Err(format!(
                "gap on {belt} must close after it opens ({open_at} >= {close_at})"
            ));
        }
        Ok(Self {
            belt,
            open_at,
            close_at,
        })
    }
}

/// A global pause window scheduled on the driver clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PauseSchedule {
    pub pause_at: f64,
    pub resume_at: f64,
}

impl FromStr for PauseSchedule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let Some((pause, resume)) = s.split_once(':') else {
            return Err(format!("expected <pause_at_s>:<resume_at_s>, got {s:?}"));
        };
        let pause_at = parse_seconds(pause)?;
        let resume_at = parse_seconds(resume)?;
        if resume_at <= pause_at {
            return Err(format!("resume ({resume_at}) must come after pause ({pause_at})"));
        }
        Ok(Self {
            pause_at,
            resume_at,
        })
    }
}

fn parse_seconds(text: &str) -> std::result::Result<f64, String> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid seconds {text:?}: {err}"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("seconds must be finite and non-negative, got {value}"));
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    OpenGap(BeltId),
    CloseGap(BeltId),
    Pause,
    Resume,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScheduledEvent {
    at: f64,
    action: Action,
}

fn build_schedule(gaps: &[GapSchedule], pause: Option<PauseSchedule>) -> Vec<ScheduledEvent> {
    let mut events = Vec::new();
    for gap in gaps {
        events.push(ScheduledEvent {
            at: gap.open_at,
            action: Action::OpenGap(gap.belt),
        });
        events.push(ScheduledEvent {
            at: gap.close_at,
            action: Action::CloseGap(gap.belt),
        });
    }
    if let Some(window) = pause {
        events.push(ScheduledEvent {
            at: window.pause_at,
            action: Action::Pause,
        });
        events.push(ScheduledEvent {
            at: window.resume_at,
            action: Action::Resume,
        });
    }
    events.sort_by(|a, b| a.at.total_cmp(&b.at));
    events
}

fn apply(timeline: &mut SimulationTimeline, event: &ScheduledEvent) {
    let outcome = match event.action {
        Action::OpenGap(belt) => timeline.open_gap(belt),
        Action::CloseGap(belt) => timeline.close_gap(belt),
        Action::Pause => timeline.pause(),
        Action::Resume => timeline.resume(),
    };
    match outcome {
        Ok(()) => info!(at_s = event.at, action = ?event.action, "scheduled event applied"),
        Err(err) => warn!(at_s = event.at, action = ?event.action, %err, "scheduled event skipped"),
    }
}

/// Final state of a simulation run.
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub state: TimelineState,
    pub ticks: u64,
    pub driver_clock_s: f64,
    pub simulation_clock_s: f64,
    pub truncated: bool,
    pub notices: Vec<TimelineNotice>,
    pub held_s: [f64; 3],
    pub belts: [BeltSnapshot; 3],
}

/// Run the tick loop to completion (or `max_ticks`) and collect notices.
///
/// `on_notice` sees every notice as it is raised.
pub fn run_simulation(
    timeline: &mut SimulationTimeline,
    args: &SimulateArgs,
    mut on_notice: impl FnMut(&TimelineNotice),
) -> Result<SimulationReport> {
    ensure!(
        args.tick.is_finite() && args.tick > 0.0,
        "tick must be a positive number of seconds, got {}",
        args.tick
    );

    let schedule = build_schedule(&args.gaps, args.pause);
    let mut pending = schedule.iter().peekable();
    let mut notices = Vec::new();
    let mut driver_clock = 0.0;
    let mut ticks = 0_u64;
    let mut truncated = false;

    timeline.start().context("failed to start the simulation")?;

    while matches!(
        timeline.state(),
        TimelineState::Running | TimelineState::Paused
    ) {
        if args.max_ticks.is_some_and(|max| ticks >= max) {
            truncated = true;
            break;
        }

        while let Some(event) = pending.next_if(|e| e.at <= driver_clock + 1e-9) {
            apply(timeline, event);
        }

        for notice in timeline.advance(args.tick)? {
            on_notice(&notice);
            notices.push(notice);
        }
        driver_clock += args.tick;
        ticks += 1;

        if args.realtime {
            thread::sleep(Duration::from_secs_f64(args.tick));
        }
    }

    Ok(SimulationReport {
        state: timeline.state(),
        ticks,
        driver_clock_s: driver_clock,
        simulation_clock_s: timeline.clock(),
        truncated,
        notices,
        held_s: BeltId::ALL.map(|belt| timeline.held(belt)),
        belts: timeline.snapshots(),
    })
}

pub fn handle_simulate(args: &SimulateArgs, ctx: &CliContext) -> Result<()> {
    if args.format == OutputFormat::Csv {
        bail!("simulate supports --format text or json");
    }

    let input = args.speeds.to_input()?;
    let mut session = Session::new(ctx.calibration()?);
    session.calculate(&input).context("calculation rejected")?;

    let text = args.format == OutputFormat::Text;
    let palette = ctx.palette;
    let report = run_simulation(session.timeline_mut(), args, |notice| {
        if text {
            println!("{}", format_notice(notice, &palette));
        }
    })?;

    if !text {
        render_json(&report)?;
        return Ok(());
    }

    let renderer = TextBarRenderer::new(
        palette,
        BarGlyphs::detect(),
        TextBarRenderer::DEFAULT_WIDTH,
    );
    println!();
    for line in renderer.render_all(&report.belts) {
        println!("{line}");
    }
    for belt in BeltId::ALL {
        let held = report.held_s[belt.index()];
        if held > 0.0 {
            println!("{belt} held by feed stops for {:.1} s", held);
        }
    }
    if report.truncated {
        println!(
            "{}stopped after {} ticks ({}){}",
            palette.orange, report.ticks, report.state, palette.reset
        );
    }
    Ok(())
}
