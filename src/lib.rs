//! Cost and security reports for Terraform state.
//!
//! A report is built in five steps: the state document is parsed, managed
//! resources are extracted, every resource is run through a cost and a
//! security checker, the worst security severity is computed, and the
//! result is combined with the project's configuration.

pub mod assembler;
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod report;
pub mod reporter;
pub mod state;
pub mod store;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use assembler::{AssemblerConfig, ReportAssembler, ReportService};
pub use checks::{
    CheckDispatcher, CheckError, Checker, CheckerRegistry, CostVerdict, SecurityVerdict,
};
pub use cli::{Cli, Command, OutputFormat};
pub use config::{Config, ConfigError};
pub use error::{ReportError, Result};
pub use report::{
    CheckedResource, ListedReport, NO_SEVERITY, ProjectConfig, Report, aggregate_severity,
};
pub use reporter::{Reporter, json::JsonReporter, terminal::TerminalReporter};
pub use state::{
    PendingResource, RawResource, ResourceMode, StateDocument, StateMetadata, StateParser,
    StateSource, extract_managed, resource_id,
};
pub use store::{FsProjectStore, MemoryProjectStore, ProjectStore};
pub use types::{ProjectId, ProjectToken};
