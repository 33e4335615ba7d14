//! migrate-up and migrate-up-by-number command implementations

use anyhow::{Context, Result};
use keel_engine::RunReport;

use crate::cli::{CountArgs, GlobalArgs};
use crate::commands::common::with_runner;

/// Execute the migrate-up command
pub(crate) fn execute_all(global: &GlobalArgs) -> Result<()> {
    let report = with_runner(global, |runner| {
        runner.apply_all().context("could not apply migrations")
    })?;
    print_report(&report);
    Ok(())
}

/// Execute the migrate-up-by-number command
pub(crate) fn execute_by_number(args: &CountArgs, global: &GlobalArgs) -> Result<()> {
    let report = with_runner(global, |runner| {
        runner
            .apply_n(args.number)
            .context("could not apply migrations")
    })?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    if report.is_noop() {
        println!("Database is already at the latest version or all migrations are already applied.");
        return;
    }
    for id in &report.transitioned {
        println!("Successfully applied migration: {id}");
    }
}
