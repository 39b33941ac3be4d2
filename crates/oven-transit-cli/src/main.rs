use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use oven_transit_cli::commands::anchors::{handle_anchors, AnchorsAction};
use oven_transit_cli::commands::breakdown::{handle_breakdown, BreakdownArgs};
use oven_transit_cli::commands::calc::{handle_calc, CalcArgs};
use oven_transit_cli::commands::simulate::{handle_simulate, SimulateArgs};
use oven_transit_cli::commands::CliContext;

#[derive(Parser, Debug)]
#[command(author, version, about = "Oven conveyor transit-time calculator")]
struct Cli {
    /// Anchor override file (defaults to OVEN_TRANSIT_ANCHOR_FILE, then the platform data dir).
    #[arg(long, global = true)]
    anchor_file: Option<PathBuf>,

    /// Disable ANSI colors.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute transit times and the layer-thickness indicator.
    Calc(CalcArgs),
    /// Simulate product progress through the three belts.
    Simulate(SimulateArgs),
    /// Manage anchor constant overrides.
    Anchors {
        #[command(subcommand)]
        action: AnchorsAction,
    },
    /// Split each belt's transit time across its segments.
    Breakdown(BreakdownArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let ctx = CliContext::new(cli.anchor_file, cli.no_color);

    match &cli.command {
        Command::Calc(args) => handle_calc(args, &ctx),
        Command::Simulate(args) => handle_simulate(args, &ctx),
        Command::Anchors { action } => handle_anchors(action, &ctx),
        Command::Breakdown(args) => handle_breakdown(args, &ctx),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
