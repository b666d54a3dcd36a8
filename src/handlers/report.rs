//! `statescope report` handler.

use super::{error_exit, reporter, setup};
use crate::cli::Cli;
use crate::types::ProjectId;
use std::process::ExitCode;
use tracing::info;

/// Generate a report for `project`, store it unless `no_save`, and print it.
///
/// Exits with 1 when the report severity reaches the `--fail-on` threshold
/// (falling back to `report.fail_on` from the config).
pub fn handle_report(
    cli: &Cli,
    project: &ProjectId,
    fail_on: Option<i64>,
    no_save: bool,
) -> ExitCode {
    let (config, service) = match setup(cli) {
        Ok(ready) => ready,
        Err(code) => return code,
    };
    let fail_on = fail_on.or(config.report.fail_on);

    let generated = if no_save {
        service.assembler().assemble(project)
    } else {
        service.publish(project)
    };
    let report = match generated {
        Ok(report) => report,
        Err(e) => return error_exit(format!("Failed to generate report for {project}: {e}")),
    };

    println!("{}", reporter(cli, fail_on).report(&report));

    match fail_on {
        Some(threshold) if report.severity >= threshold => {
            info!(
                %project,
                severity = report.severity,
                threshold,
                "Severity at or above threshold"
            );
            ExitCode::from(1)
        }
        _ => ExitCode::SUCCESS,
    }
}
