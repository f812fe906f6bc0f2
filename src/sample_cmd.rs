use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

use dsample_calendar::Resolution;
use dsample_sampler::{DataInput, sample_datastream, sample_gdbc};

use crate::cli::{Cli, CommonArgs, SampleArgs, SampleGdbcArgs};
use crate::config::DsampleConfig;

/// CLI flags merged with config-file defaults.
struct Settings {
    mask: PathBuf,
    layers: Vec<String>,
    output_dir: PathBuf,
    resolution: Resolution,
}

fn resolve_settings(cli: &Cli, common: &CommonArgs) -> Result<Settings> {
    let config = DsampleConfig::load(cli.config.as_deref())?;
    let defaults = config.sample;

    let mask = common
        .mask
        .clone()
        .or(defaults.mask)
        .context("no mask dataset: pass --mask or set [sample].mask in config")?;

    let layers = if common.layers.is_empty() {
        defaults.layers
    } else {
        common.layers.clone()
    };
    if layers.is_empty() {
        bail!("no mask layers: pass --layers or set [sample].layers in config");
    }

    let output_dir = common
        .output_dir
        .clone()
        .or(defaults.output_dir)
        .context("no output directory: pass --output-dir or set [sample].output_dir in config")?;

    let time_step = common
        .time_step
        .clone()
        .or(defaults.time_step)
        .unwrap_or_else(|| "daily".to_string());
    let resolution: Resolution = time_step.parse()?;

    Ok(Settings {
        mask,
        layers,
        output_dir,
        resolution,
    })
}

/// Run the `sample` subcommand.
pub fn run_sample(cli: &Cli, args: &SampleArgs) -> Result<()> {
    let settings = resolve_settings(cli, &args.common)?;

    let input = if args.data == "-" {
        DataInput::Stdin
    } else {
        DataInput::Path(PathBuf::from(&args.data))
    };

    let written = sample_datastream(
        &settings.mask,
        input,
        &settings.layers,
        &settings.output_dir,
        args.common.year,
        &args.common.variable,
        settings.resolution,
    )
    .with_context(|| format!("failed to sample {}", args.data))?;

    info!(n_tables = written.len(), "sampling complete");
    Ok(())
}

/// Run the `sample-gdbc` subcommand.
pub fn run_gdbc(cli: &Cli, args: &SampleGdbcArgs) -> Result<()> {
    let settings = resolve_settings(cli, &args.common)?;

    let written = sample_gdbc(
        &settings.mask,
        &args.gdbc,
        &args.network,
        &settings.layers,
        &settings.output_dir,
        args.common.year,
        &args.common.variable,
        settings.resolution,
    )
    .with_context(|| format!("failed to sample {}", args.gdbc.display()))?;

    info!(n_tables = written.len(), "sampling complete");
    Ok(())
}
