//! Oven transit CLI library.
//!
//! Subcommand handlers, terminal styling and output formatting for the
//! `oven-transit` binary.

pub mod commands;
pub mod output;
pub mod terminal;
