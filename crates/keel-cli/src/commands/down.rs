//! migrate-down and migrate-down-by-number command implementations

use anyhow::{Context, Result};
use keel_engine::RunReport;

use crate::cli::{CountArgs, GlobalArgs};
use crate::commands::common::with_runner;

/// Execute the migrate-down command
pub(crate) fn execute_all(global: &GlobalArgs) -> Result<()> {
    let report = with_runner(global, |runner| {
        runner.rollback_all().context("could not roll back migrations")
    })?;
    print_report(&report);
    Ok(())
}

/// Execute the migrate-down-by-number command
pub(crate) fn execute_by_number(args: &CountArgs, global: &GlobalArgs) -> Result<()> {
    let report = with_runner(global, |runner| {
        runner
            .rollback_n(args.number)
            .context("could not roll back migrations")
    })?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    if report.is_noop() {
        println!("No applied migrations to roll back.");
        return;
    }
    for id in &report.transitioned {
        println!("Successfully rolled back migration: {id}");
    }
}
