//! sync-dependency - keep vendored copies of a git submodule in sync
//!
//! Updates a dependency submodule to its remote's latest commit, replaces
//! every consumer directory with a fresh copy of it, then commits and
//! pushes the superproject to each configured remote.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod common;
mod config;
mod domain;
mod error;
mod git;
mod hash;
mod operations;
mod transaction;
mod ui;
mod workspace;

use cli::{Cli, Commands};
use error::SyncError;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn report_error(err: &SyncError) {
    eprintln!("Error ({} step): {}", err.step(), err);
    if let Some(help) = err.help() {
        eprintln!("  help: {help}");
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => commands::sync::run(cli.workspace, cli.config, cli.sync),
        Some(Commands::Verify(args)) => commands::verify::run(cli.workspace, cli.config, args),
        Some(Commands::Completions(args)) => commands::completions::run(args),
    };

    if let Err(err) = result {
        log::debug!("{err:?}");
        report_error(&err);
        std::process::exit(1);
    }
}
