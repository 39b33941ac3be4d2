//! Subcommand handlers.
//!
//! main.rs parses arguments and dispatches here; each module owns one
//! subcommand. Shared argument groups and calibration loading live in this
//! file.

pub mod anchors;
pub mod breakdown;
pub mod calc;
pub mod simulate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use oven_transit_lib::{
    resolve_anchor_path, AnchorConstants, AnchorOverrideStore, CalibrationConfig, SpeedInput,
};

use crate::terminal::ColorPalette;

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub anchor_file: Option<PathBuf>,
    pub palette: ColorPalette,
}

impl CliContext {
    pub fn new(anchor_file: Option<PathBuf>, no_color: bool) -> Self {
        Self {
            anchor_file,
            palette: ColorPalette::resolve(no_color),
        }
    }

    /// Open the anchor override store at the resolved path.
    pub fn load_overrides(&self) -> Result<AnchorOverrideStore> {
        let path = resolve_anchor_path(self.anchor_file.as_deref())
            .context("failed to locate the anchor override file")?;
        AnchorOverrideStore::load(&path)
            .with_context(|| format!("failed to load anchor overrides from {}", path.display()))
    }

    /// Reference belt constants plus built-in anchors with overrides applied.
    pub fn calibration(&self) -> Result<CalibrationConfig> {
        let store = self.load_overrides()?;
        let anchors = store.apply(AnchorConstants::builtin());
        debug!(path = %store.path().display(), ?anchors, "calibration resolved");
        Ok(CalibrationConfig::with_anchor(anchors))
    }
}

/// Speed entries as typed on the oven console.
///
/// Values above 200 are console readings (Hz × 100); `,` is accepted as
/// decimal separator.
#[derive(Args, Debug, Clone)]
pub struct SpeedArgs {
    /// Belt 1 speed (Hz, or console reading).
    #[arg(long, allow_hyphen_values = true)]
    pub f1: String,
    /// Belt 2 speed (Hz, or console reading).
    #[arg(long, allow_hyphen_values = true)]
    pub f2: String,
    /// Belt 3 speed (Hz, or console reading).
    #[arg(long, allow_hyphen_values = true)]
    pub f3: String,
    /// Input layer thickness in cm; enables the thickness indicator.
    #[arg(long, allow_hyphen_values = true)]
    pub h0: Option<String>,
}

impl SpeedArgs {
    pub fn to_input(&self) -> Result<SpeedInput> {
        SpeedInput::parse(
            [self.f1.as_str(), self.f2.as_str(), self.f3.as_str()],
            self.h0.as_deref(),
        )
        .context("invalid speed entries")
    }
}
