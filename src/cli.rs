use crate::types::ProjectId;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "statescope",
    version,
    about = "Cost and security reports for Terraform state",
    long_about = "statescope reads a project's Terraform state, checks every managed resource for cost and security, and reports the worst severity found."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Project store directory (overrides store.root from the config)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Config file (defaults to .statescope.* in the working directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate and store a fresh report for a project
    Report {
        /// Project id
        project: ProjectId,

        /// Exit with status 1 when the report severity is at or above this value
        #[arg(long, allow_negative_numbers = true)]
        fail_on: Option<i64>,

        /// Print the report without storing it
        #[arg(long)]
        no_save: bool,
    },
    /// Print the last stored report of a project
    Show {
        /// Project id
        project: ProjectId,
    },
    /// List reports of every project, generating missing ones
    List,
}
