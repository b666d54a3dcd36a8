//! Report publication and lookup.

use super::ReportAssembler;
use crate::error::{ReportError, Result};
use crate::report::{ListedReport, Report};
use crate::store::ProjectStore;
use crate::types::ProjectId;
use tracing::{info, warn};

/// Assembles, persists and looks up project reports.
pub struct ReportService<S> {
    assembler: ReportAssembler<S>,
}

impl<S: ProjectStore> ReportService<S> {
    pub fn new(assembler: ReportAssembler<S>) -> Self {
        Self { assembler }
    }

    pub fn assembler(&self) -> &ReportAssembler<S> {
        &self.assembler
    }

    /// Assemble a fresh report and store it. Nothing is stored when
    /// assembly fails.
    pub fn publish(&self, project: &ProjectId) -> Result<Report> {
        let report = self.assembler.assemble(project)?;
        self.assembler.store().put_report(project, &report)?;
        info!(%project, severity = report.severity, "Report published");
        Ok(report)
    }

    /// Last published report of a project.
    pub fn stored(&self, project: &ProjectId) -> Result<Option<Report>> {
        self.assembler.store().get_report(project)
    }

    /// Reports of every configured project, publishing one for projects
    /// that have no usable stored report yet.
    pub fn list(&self) -> Result<Vec<ListedReport>> {
        let projects = self.assembler.store().list_projects()?;
        let mut reports = Vec::with_capacity(projects.len());

        for project in projects {
            let report = match self.stored(&project) {
                Ok(Some(report)) => report,
                Ok(None) => self.publish(&project)?,
                Err(ReportError::CorruptRecord { key, source }) => {
                    warn!(%key, error = %source, "Stored report unreadable, regenerating");
                    self.publish(&project)?
                }
                Err(e) => return Err(e),
            };
            reports.push(ListedReport {
                id: project,
                report,
            });
        }

        info!(projects = reports.len(), "Listed reports");
        Ok(reports)
    }
}
