//! `calc` command: one-shot transit time and thickness calculation.

use std::io;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use oven_transit_lib::format::{fmt_hms, fmt_long};
use oven_transit_lib::{calculate, write_csv, BeltId, CalculationResult};

use super::{CliContext, SpeedArgs};
use crate::output::{render_calculation, render_json, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct CalcArgs {
    #[command(flatten)]
    pub speeds: SpeedArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// JSON shape: the raw result plus the formatted durations shown in text mode.
#[derive(Debug, Serialize)]
pub struct CalcReport<'a> {
    #[serde(flatten)]
    pub result: &'a CalculationResult,
    pub display: DisplayTimes,
}

#[derive(Debug, Serialize)]
pub struct DisplayTimes {
    pub belts: [String; 3],
    pub total: String,
    pub total_long: String,
}

impl DisplayTimes {
    pub fn from_result(result: &CalculationResult) -> Self {
        Self {
            belts: BeltId::ALL.map(|belt| fmt_hms(result.target_seconds(belt))),
            total: fmt_hms(result.total_seconds()),
            total_long: fmt_long(result.total_seconds()),
        }
    }
}

pub fn handle_calc(args: &CalcArgs, ctx: &CliContext) -> Result<()> {
    let input = args.speeds.to_input()?;
    let config = ctx.calibration()?;
    let result = calculate(&input, &config).context("calculation rejected")?;

    match args.format {
        OutputFormat::Text => render_calculation(&result, &ctx.palette),
        OutputFormat::Json => render_json(&CalcReport {
            result: &result,
            display: DisplayTimes::from_result(&result),
        })?,
        OutputFormat::Csv => {
            write_csv(&result, io::stdout().lock()).context("failed to write CSV")?
        }
    }
    Ok(())
}
