//! Report assembly.
//!
//! [`ReportAssembler`] builds a report for one project from the store's
//! config and raw state. It never writes; [`ReportService`] layers
//! persistence and listing on top.

pub mod service;

pub use service::ReportService;

use crate::checks::CheckDispatcher;
use crate::error::{ReportError, Result};
use crate::report::{Report, aggregate_severity};
use crate::state::{StateParser, StateSource, extract_managed};
use crate::store::ProjectStore;
use crate::types::ProjectId;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Settings fixed at assembler construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Version string stamped into every report.
    pub format_version: String,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            format_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl AssemblerConfig {
    pub fn with_format_version(mut self, version: &str) -> Self {
        self.format_version = version.to_string();
        self
    }
}

/// Builds reports from project state.
pub struct ReportAssembler<S> {
    store: S,
    parser: StateParser,
    dispatcher: CheckDispatcher,
    config: AssemblerConfig,
}

impl<S: ProjectStore> ReportAssembler<S> {
    pub fn new(store: S, dispatcher: CheckDispatcher, config: AssemblerConfig) -> Self {
        Self {
            store,
            parser: StateParser::new(),
            dispatcher,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Assemble a report stamped with the current time.
    pub fn assemble(&self, project: &ProjectId) -> Result<Report> {
        self.assemble_at(project, Utc::now())
    }

    /// Assemble a report stamped with `generated_at`.
    ///
    /// Missing or malformed state yields a report without resources. Any
    /// checker failure fails the whole assembly.
    pub fn assemble_at(&self, project: &ProjectId, generated_at: DateTime<Utc>) -> Result<Report> {
        let config = self.store.get_config(project)?;
        let raw_state = match self.store.require_raw_state(project) {
            Ok(bytes) => Some(bytes),
            Err(ReportError::MissingState(missing)) => {
                warn!(
                    project = %missing,
                    "No state stored, reporting project without resources"
                );
                None
            }
            Err(e) => return Err(e),
        };
        let document = self.parser.parse(StateSource::from(raw_state.as_deref()));

        let pending = extract_managed(&document);
        debug!(%project, managed = pending.len(), "Dispatching checks");
        let resources = self.dispatcher.dispatch_all(pending)?;
        let severity = aggregate_severity(&resources);

        info!(
            %project,
            resources = resources.len(),
            severity,
            "Report assembled"
        );

        Ok(Report {
            config,
            metadata: document.metadata,
            resources,
            generated_at,
            severity,
            format_version: self.config.format_version.clone(),
        })
    }
}
