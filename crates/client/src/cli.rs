//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

/// Runs one auto-played encounter and prints what happened.
#[derive(Debug, Default, Parser)]
#[command(name = "tactics")]
#[command(about = "Turn-based grid tactics encounter runner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Encounter configuration (TOML). Defaults to the built-in config.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Scenario file (RON). Defaults to the built-in dark forest.
    #[arg(long, value_name = "FILE")]
    pub scenario: Option<PathBuf>,

    /// Extra unit templates (RON) merged over the built-in catalog.
    #[arg(long, value_name = "FILE")]
    pub templates: Option<PathBuf>,

    /// Print events as newline-delimited JSON.
    #[arg(long)]
    pub json: bool,

    /// Play presentation delays in wall-clock time.
    #[arg(long)]
    pub realtime: bool,
}
