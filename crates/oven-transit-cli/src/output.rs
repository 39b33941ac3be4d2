//! Output formatting for calculations, simulations and breakdowns.
//!
//! Every renderer works from a library value ([`CalculationResult`],
//! [`BeltSnapshot`], [`SegmentBreakdown`]) so text, JSON and CSV output
//! always show the same numbers.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use oven_transit_lib::format::{fmt_hms, fmt_long, fmt_ms};
use oven_transit_lib::{
    BarRenderer, BeltId, BeltSnapshot, BeltStatus, CalculationResult, SegmentBreakdown,
    ThicknessTrend, TimelineNotice,
};

use crate::terminal::{BarGlyphs, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Write a value as pretty JSON followed by a newline.
pub fn render_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Operator-facing summary of one calculation.
pub fn render_calculation(result: &CalculationResult, palette: &ColorPalette) {
    let p = palette;

    println!("{}Speeds{}", p.white_bold, p.reset);
    for belt in BeltId::ALL {
        let raw = result.input.raw[belt.index()];
        let hz = result.speed(belt);
        if (raw - hz).abs() > f64::EPSILON {
            println!("  {belt}  {hz:>7.2} Hz  {}(entered {raw}){}", p.gray, p.reset);
        } else {
            println!("  {belt}  {hz:>7.2} Hz");
        }
    }

    println!();
    println!(
        "{}Transit times{}  {}H:MM:SS     M:SS      min{}",
        p.white_bold, p.reset, p.gray, p.reset
    );
    for belt in BeltId::ALL {
        let seconds = result.target_seconds(belt);
        println!(
            "  {belt}  {}{:>9}{}  {:>7}  {:>7.2}",
            p.cyan,
            fmt_hms(seconds),
            p.reset,
            fmt_ms(seconds),
            result.times.belt_minutes(belt)
        );
    }
    let total = result.total_seconds();
    println!(
        "  total   {}{:>9}{}  {:>7}  {:>7.2}  {}({}){}",
        p.white_bold,
        fmt_hms(total),
        p.reset,
        fmt_ms(total),
        result.times.total_minutes(),
        p.gray,
        fmt_long(total),
        p.reset
    );

    println!();
    let Some(h0) = result.input.h0_cm else {
        println!(
            "{}Layer thickness{}  {}not computed (no input thickness){}",
            p.white_bold, p.reset, p.gray, p.reset
        );
        return;
    };
    println!(
        "{}Layer thickness{}  {}h0 = {h0:.2} cm{}",
        p.white_bold, p.reset, p.gray, p.reset
    );
    let thickness = &result.thickness;
    let deltas = [
        None,
        Some((thickness.delta_12_pct, result.trend_12())),
        Some((thickness.delta_23_pct, result.trend_23())),
    ];
    for (belt, delta) in BeltId::ALL.into_iter().zip(deltas) {
        let height = thickness
            .height(belt)
            .map(|h| format!("{h:.2} cm"))
            .unwrap_or_else(|| "n/a".to_string());
        match delta {
            None => println!("  {belt}  {height:>9}"),
            Some((pct, trend)) => println!(
                "  {belt}  {height:>9}  {}",
                format_delta(pct, trend, palette)
            ),
        }
    }
}

fn format_delta(pct: Option<f64>, trend: ThicknessTrend, palette: &ColorPalette) -> String {
    let p = palette;
    match pct {
        Some(value) => {
            let color = match trend {
                ThicknessTrend::Accumulating => p.orange,
                ThicknessTrend::Thinning => p.cyan,
                _ => p.gray,
            };
            format!("{color}{value:+.1} %{} {}", p.reset, trend.label())
        }
        None => format!("{}n/a{} (anchor unavailable)", p.gray, p.reset),
    }
}

/// One line per timeline notice.
pub fn format_notice(notice: &TimelineNotice, palette: &ColorPalette) -> String {
    let p = palette;
    match notice {
        TimelineNotice::BeltCompleted { belt, clock_s } => format!(
            "{}[{}]{} {belt} reached its transit time",
            p.cyan,
            fmt_hms(*clock_s),
            p.reset
        ),
        TimelineNotice::ExitImminent { remaining_s } => format!(
            "{}product exits in {}{}",
            p.orange,
            fmt_ms(*remaining_s),
            p.reset
        ),
        TimelineNotice::Completed { clock_s } => format!(
            "{}[{}]{} {}all belts completed{}",
            p.cyan,
            fmt_hms(*clock_s),
            p.reset,
            p.white_bold,
            p.reset
        ),
    }
}

/// Segment time split for one or more belts.
pub fn render_breakdowns(splits: &[SegmentBreakdown], palette: &ColorPalette) {
    let p = palette;
    for (i, split) in splits.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "{}{}{}  {}{:.2} s/m{}",
            p.white_bold, split.belt, p.reset, p.gray, split.seconds_per_metre, p.reset
        );
        println!("  pre-zone   {:>9}", fmt_hms(split.pre_s));
        for cell in &split.cells {
            println!("  cell {:<5} {:>9}", cell.cell, fmt_hms(cell.seconds));
        }
        println!("  transfer   {:>9}", fmt_hms(split.transfer_s));
        println!("  heating    {:>9}", fmt_hms(split.heating_s));
        println!(
            "  transit    {:>9}  {}(segments sum to {}){}",
            fmt_hms(split.convoy_s),
            p.gray,
            fmt_hms(split.rebuilt_s),
            p.reset
        );
    }
}

/// Draws a belt snapshot as a fixed-width text bar.
///
/// Gap holes are drawn over the bar at their recorded position, so a belt
/// held by a feed stop shows the hole growing ahead of its frozen progress.
#[derive(Debug, Clone, Copy)]
pub struct TextBarRenderer {
    palette: ColorPalette,
    glyphs: BarGlyphs,
    width: usize,
}

impl TextBarRenderer {
    pub const DEFAULT_WIDTH: usize = 36;

    #[must_use]
    pub const fn new(palette: ColorPalette, glyphs: BarGlyphs, width: usize) -> Self {
        Self {
            palette,
            glyphs,
            width,
        }
    }

    fn cell_kind(&self, snapshot: &BeltSnapshot, index: usize) -> Cell {
        let pos = (index as f64 + 0.5) / self.width as f64;
        if snapshot
            .gaps
            .iter()
            .any(|gap| pos >= gap.start && pos < gap.end)
        {
            Cell::Gap
        } else if pos < snapshot.fraction {
            Cell::Filled
        } else {
            Cell::Empty
        }
    }

    fn status_color(&self, status: BeltStatus) -> &'static str {
        match status {
            BeltStatus::Done => self.palette.green,
            BeltStatus::Held => self.palette.orange,
            BeltStatus::Paused => self.palette.red,
            BeltStatus::Active | BeltStatus::Waiting => self.palette.gray,
        }
    }
}

impl Default for TextBarRenderer {
    fn default() -> Self {
        Self::new(ColorPalette::detect(), BarGlyphs::detect(), Self::DEFAULT_WIDTH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Filled,
    Empty,
    Gap,
}

impl BarRenderer for TextBarRenderer {
    type Output = String;

    fn render_bar(&self, snapshot: &BeltSnapshot) -> String {
        let p = &self.palette;
        let mut bar = String::new();
        let mut current = None;
        for index in 0..self.width {
            let kind = self.cell_kind(snapshot, index);
            if current != Some(kind) {
                if current.is_some() {
                    bar.push_str(p.reset);
                }
                bar.push_str(match kind {
                    Cell::Filled => p.green,
                    Cell::Empty => p.gray,
                    Cell::Gap => p.orange,
                });
                current = Some(kind);
            }
            bar.push(match kind {
                Cell::Filled => self.glyphs.filled,
                Cell::Empty => self.glyphs.empty,
                Cell::Gap => self.glyphs.gap,
            });
        }
        bar.push_str(p.reset);

        format!(
            "{belt}  [{bar}] {pct:>5.1}%  cell {marker}/9  {elapsed}/{target}  {color}{status}{reset}",
            belt = snapshot.belt,
            pct = snapshot.percent(),
            marker = snapshot.cell_marker,
            elapsed = fmt_hms(snapshot.elapsed_s),
            target = fmt_hms(snapshot.target_s),
            color = self.status_color(snapshot.status),
            status = snapshot.status.label(),
            reset = p.reset,
        )
    }
}
