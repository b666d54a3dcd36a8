//! `statescope list` handler.

use super::{error_exit, reporter, setup};
use crate::cli::Cli;
use std::process::ExitCode;
use tracing::info;

/// Print the report of every project, generating the ones not stored yet.
pub fn handle_list(cli: &Cli) -> ExitCode {
    let (config, service) = match setup(cli) {
        Ok(ready) => ready,
        Err(code) => return code,
    };

    match service.list() {
        Ok(reports) => {
            info!(projects = reports.len(), "Listed project reports");
            println!("{}", reporter(cli, config.report.fail_on).report_list(&reports));
            ExitCode::SUCCESS
        }
        Err(e) => error_exit(format!("Failed to list reports: {e}")),
    }
}
