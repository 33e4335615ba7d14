//! Keel CLI - apply, roll back, and inspect SQL schema migrations

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{down, status, up, version};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::MigrateUp => up::execute_all(&cli.global),
        cli::Commands::MigrateUpByNumber(args) => up::execute_by_number(args, &cli.global),
        cli::Commands::MigrateDown => down::execute_all(&cli.global),
        cli::Commands::MigrateDownByNumber(args) => down::execute_by_number(args, &cli.global),
        cli::Commands::CurrentVersion => version::execute(&cli.global),
        cli::Commands::Status(args) => status::execute(args, &cli.global),
    }
}

/// Route `log` output to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
