//! Command-line interface for music-shelf.
//!
//! This module provides commands for listing and searching a library built
//! from tag scans or exported JSON rows.

mod commands;

pub use commands::{Cli, Commands, run_command};
