//! CLI command handlers.
//!
//! Each handler loads the configuration, builds a report service over the
//! filesystem store and maps the outcome to an exit code, so they can be
//! unit tested without spawning the binary.

mod list;
mod report;
mod show;

pub use list::handle_list;
pub use report::handle_report;
pub use show::handle_show;

use crate::assembler::{AssemblerConfig, ReportAssembler, ReportService};
use crate::checks::{CheckDispatcher, PriceTableCostChecker, RuleSecurityChecker};
use crate::cli::{Cli, OutputFormat};
use crate::config::{Config, ConfigError};
use crate::reporter::{Reporter, json::JsonReporter, terminal::TerminalReporter};
use crate::store::FsProjectStore;
use colored::Colorize;
use std::process::ExitCode;
use tracing::debug;

/// Exit code for any error.
const EXIT_ERROR: u8 = 2;

fn error_exit(message: impl std::fmt::Display) -> ExitCode {
    eprintln!("{} {}", "Error:".red(), message);
    ExitCode::from(EXIT_ERROR)
}

/// Load the config named by `--config`, or search the working directory.
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    match &cli.config {
        Some(path) => Config::from_file(path),
        None => {
            let cwd = std::env::current_dir().ok();
            Config::load(cwd.as_deref())
        }
    }
}

/// Build the report service for the effective store and checkers.
fn build_service(
    cli: &Cli,
    config: &Config,
) -> Result<ReportService<FsProjectStore>, ConfigError> {
    let root = cli.store.clone().unwrap_or_else(|| config.store.root.clone());
    debug!(root = %root.display(), "Using filesystem project store");

    let security = RuleSecurityChecker::registry(&config.security)?;
    let cost = PriceTableCostChecker::registry(&config.cost);
    debug!(
        security_families = ?security.families().collect::<Vec<_>>(),
        cost_families = ?cost.families().collect::<Vec<_>>(),
        "Built checker registries"
    );
    let dispatcher = CheckDispatcher::new(cost, security);

    let assembler_config = match &config.report.format_version {
        Some(version) => AssemblerConfig::default().with_format_version(version),
        None => AssemblerConfig::default(),
    };

    Ok(ReportService::new(ReportAssembler::new(
        FsProjectStore::new(root),
        dispatcher,
        assembler_config,
    )))
}

fn reporter(cli: &Cli, fail_on: Option<i64>) -> Box<dyn Reporter> {
    match cli.format {
        OutputFormat::Json => Box::new(JsonReporter::new()),
        OutputFormat::Terminal => Box::new(TerminalReporter::new(cli.verbose).with_fail_on(fail_on)),
    }
}

/// Load config and build the service, reporting failures as exit code 2.
fn setup(cli: &Cli) -> Result<(Config, ReportService<FsProjectStore>), ExitCode> {
    let config = load_config(cli).map_err(error_exit)?;
    let service = build_service(cli, &config).map_err(error_exit)?;
    Ok((config, service))
}
