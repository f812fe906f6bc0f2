use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Datastream sampler for RGIS hydrological model output.
#[derive(Parser)]
#[command(
    name = "dsample",
    version,
    about = "Sample RGIS datastream grids onto mask time series tables"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Optional TOML file supplying defaults for mask, layers, output
    /// directory, and time step.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Sample a datastream file (or stdin) with a NetCDF mask.
    Sample(SampleArgs),
    /// Sample a gdbc grid by bridging it through rgis2ds.
    SampleGdbc(SampleGdbcArgs),
}

/// Arguments for the `sample` subcommand.
#[derive(clap::Args)]
pub struct SampleArgs {
    /// Datastream file (.gds, .ds, .gds.gz, .ds.gz), or `-` for stdin.
    pub data: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the `sample-gdbc` subcommand.
#[derive(clap::Args)]
pub struct SampleGdbcArgs {
    /// Source gdbc grid file.
    pub gdbc: PathBuf,

    /// Network template (gdbn) defining the target grid shape.
    #[arg(short, long)]
    pub network: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments shared by both sampling subcommands.
#[derive(clap::Args)]
pub struct CommonArgs {
    /// NetCDF mask dataset (overrides config).
    #[arg(short, long)]
    pub mask: Option<PathBuf>,

    /// Mask layers to sample with (comma separated; overrides config).
    #[arg(short, long, value_delimiter = ',')]
    pub layers: Vec<String>,

    /// Output root directory (overrides config).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Year of the datastream file.
    #[arg(short, long)]
    pub year: i32,

    /// Variable of the datastream file (e.g. Discharge, Runoff).
    #[arg(long)]
    pub variable: String,

    /// Temporal resolution: annual, monthly, or daily (overrides config).
    #[arg(short, long)]
    pub time_step: Option<String>,
}
