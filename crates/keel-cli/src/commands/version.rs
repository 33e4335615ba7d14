//! current-version command implementation

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::commands::common::with_runner;

/// Execute the current-version command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let version = with_runner(global, |runner| {
        runner
            .current_version()
            .context("could not get current version")
    })?;
    println!("Current version: {version}");
    Ok(())
}
