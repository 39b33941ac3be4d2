//! Oven transit library entry points.
//!
//! This crate converts conveyor drive speeds into per-belt transit times,
//! derives the relative layer-thickness indicator, and drives a tick-based
//! simulation of product progress through the three belts. Front ends (the
//! CLI, future dashboards) should only depend on what is exported here
//! instead of reimplementing the formulas.
//!

#![deny(warnings)]

pub mod belt;
pub mod calculation;
pub mod calibration;
pub mod constants;
pub mod error;
pub mod export;
pub mod format;
pub mod geometry;
pub mod overrides;
pub mod render;
pub mod session;
pub mod thickness;
pub mod time_model;
pub mod timeline;
pub mod units;

pub use belt::{BeltId, BELT_COUNT};
pub use calculation::{calculate, CalculationResult, SpeedInput};
pub use calibration::{AnchorConstants, BeltConstants, CalibrationConfig};
pub use error::{Error, Result};
pub use export::{to_csv_string, write_csv};
pub use format::{fmt_hms, fmt_long, fmt_ms};
pub use geometry::{belt_for_cell, breakdown, BeltGeometry, SegmentBreakdown};
pub use overrides::{default_anchor_path, resolve_anchor_path, AnchorOverrideStore};
pub use render::{BarRenderer, BeltSnapshot};
pub use session::Session;
pub use thickness::{compute_thickness, ThicknessProfile, ThicknessTrend};
pub use time_model::{compute_times, TransitTimes};
pub use timeline::{
    BeltStatus, GapInterval, GapSpan, SimulationTimeline, TimelineNotice, TimelineState,
};
pub use units::{normalize, parse_speed};
