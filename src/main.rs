mod cli;
mod config;
mod logging;
mod sample_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Sample(args) => sample_cmd::run_sample(cli, args),
        Command::SampleGdbc(args) => sample_cmd::run_gdbc(cli, args),
    }
}
