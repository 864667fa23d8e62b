//! sqlmove CLI - regenerate an extension's migration tree from a source SQL repository

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{ls, run};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        None | Some(cli::Commands::Run) => run::execute(&cli.global),
        Some(cli::Commands::Ls(args)) => ls::execute(args, &cli.global),
    }
}

/// `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
