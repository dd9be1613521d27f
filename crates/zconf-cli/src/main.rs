//! zconf CLI
//!
//! Reads zypper configuration the way zypper does and prints what it finds.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use zconf_core::{ConfigEngine, Environment};

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose).map_err(|e| CliError::Logging {
        message: e.to_string(),
    })?;
    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    let mut env = Environment::from_process();
    if let Some(root) = &cli.root {
        env = env.with_root(root);
    }

    let engine = ConfigEngine::open(cli.config.as_deref(), &env)?;
    execute_command(&engine, cli.command, cli.verbose)
}

fn execute_command(engine: &ConfigEngine, cmd: Commands, verbose: bool) -> Result<()> {
    match cmd {
        Commands::Get { options, json } => commands::run_get(engine, &options, json, verbose),
        Commands::Dump => commands::run_dump(engine),
        Commands::Sources { json } => commands::run_sources(engine, json),
    }
}
