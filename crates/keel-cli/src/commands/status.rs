//! Status command implementation

use anyhow::{Context, Result};
use keel_engine::StatusReport;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::with_runner;

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let report = with_runner(global, |runner| {
        runner.status().context("could not read migration status")
    })?;

    match args.output {
        StatusOutput::Table => print_table(&report),
        StatusOutput::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn print_table(report: &StatusReport) {
    if report.migrations.is_empty() {
        println!("No migrations found.");
    } else {
        let width = report
            .migrations
            .iter()
            .map(|m| m.id.len())
            .max()
            .unwrap_or(0)
            .max("MIGRATION".len());

        println!("{:<width$}  STATE", "MIGRATION");
        println!("{}  {}", "-".repeat(width), "-".repeat(7));
        for m in &report.migrations {
            println!("{:<width$}  {}", m.id.as_str(), m.state);
        }
    }

    println!();
    println!(
        "Current version: {} ({} applied in sequence, {} pending)",
        report.version,
        report.contiguous,
        report.pending().count()
    );

    if !report.unknown_applied.is_empty() {
        println!();
        println!("Applied but missing from the migrations directory:");
        for id in &report.unknown_applied {
            println!("  {id}");
        }
    }
}
