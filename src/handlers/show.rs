//! `statescope show` handler.

use super::{error_exit, reporter, setup};
use crate::cli::Cli;
use crate::types::ProjectId;
use std::process::ExitCode;

/// Print the last stored report of `project`.
pub fn handle_show(cli: &Cli, project: &ProjectId) -> ExitCode {
    let (config, service) = match setup(cli) {
        Ok(ready) => ready,
        Err(code) => return code,
    };

    match service.stored(project) {
        Ok(Some(report)) => {
            println!("{}", reporter(cli, config.report.fail_on).report(&report));
            ExitCode::SUCCESS
        }
        Ok(None) => error_exit(format!(
            "No report stored for {project}; run `statescope report {project}` first"
        )),
        Err(e) => error_exit(format!("Failed to read report for {project}: {e}")),
    }
}
