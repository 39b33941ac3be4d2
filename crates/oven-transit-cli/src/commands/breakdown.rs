//! `breakdown` command: split each belt's transit time across its segments.

use anyhow::{bail, Context, Result};
use clap::Args;

use oven_transit_lib::{breakdown, calculate, BeltId, SegmentBreakdown};

use super::{CliContext, SpeedArgs};
use crate::output::{render_breakdowns, render_json, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub speeds: SpeedArgs,
    /// Only show this belt.
    #[arg(long)]
    pub belt: Option<BeltId>,
    /// Output format (text or json).
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn handle_breakdown(args: &BreakdownArgs, ctx: &CliContext) -> Result<()> {
    if args.format == OutputFormat::Csv {
        bail!("breakdown supports --format text or json");
    }

    let input = args.speeds.to_input()?;
    let result = calculate(&input, &ctx.calibration()?).context("calculation rejected")?;

    let belts: Vec<BeltId> = match args.belt {
        Some(belt) => vec![belt],
        None => BeltId::ALL.to_vec(),
    };
    let splits = belts
        .into_iter()
        .map(|belt| breakdown(belt, result.target_seconds(belt)))
        .collect::<oven_transit_lib::Result<Vec<SegmentBreakdown>>>()?;

    match args.format {
        OutputFormat::Json => render_json(&splits)?,
        _ => render_breakdowns(&splits, &ctx.palette),
    }
    Ok(())
}
