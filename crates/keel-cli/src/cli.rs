//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Keel - apply and roll back SQL schema migrations
#[derive(Parser, Debug)]
#[command(name = "keel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Database path (":memory:" for an in-memory database)
    #[arg(short, long, global = true, env = "KEEL_DATABASE")]
    pub database: Option<String>,

    /// Path to the migrations directory
    #[arg(short, long, global = true, env = "KEEL_MIGRATIONS")]
    pub migrations: Option<String>,

    /// Do not wrap each migration in a transaction
    #[arg(long, global = true)]
    pub no_transaction: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply every pending migration
    MigrateUp,

    /// Apply pending migrations among the first N
    MigrateUpByNumber(CountArgs),

    /// Roll back every applied migration
    MigrateDown,

    /// Roll back applied migrations among the last N
    MigrateDownByNumber(CountArgs),

    /// Print the number of applied migrations
    CurrentVersion,

    /// Show the state of each migration
    Status(StatusArgs),
}

/// Arguments for the *-by-number commands
#[derive(Args, Debug)]
pub struct CountArgs {
    /// Number of migration positions to consider
    #[arg(short, long, default_value_t = 1)]
    pub number: usize,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
