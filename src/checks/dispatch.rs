//! Per-resource check dispatch.

use super::{CheckError, Checker, CostChecker, CostVerdict, SecurityChecker, SecurityVerdict};
use crate::error::{ReportError, Result};
use crate::report::CheckedResource;
use crate::state::PendingResource;
use tracing::{debug, trace};

/// Runs a cost and a security checker against each resource.
pub struct CheckDispatcher {
    cost: Box<CostChecker>,
    security: Box<SecurityChecker>,
}

impl CheckDispatcher {
    pub fn new(
        cost: impl Checker<Verdict = CostVerdict> + 'static,
        security: impl Checker<Verdict = SecurityVerdict> + 'static,
    ) -> Self {
        Self {
            cost: Box::new(cost),
            security: Box::new(security),
        }
    }

    pub fn cost_checker(&self) -> &str {
        self.cost.name()
    }

    pub fn security_checker(&self) -> &str {
        self.security.name()
    }

    /// Check one resource. Either verdict failing fails the resource.
    pub fn dispatch(&self, pending: PendingResource) -> Result<CheckedResource> {
        let cost = self
            .cost
            .run(&pending.resource)
            .map_err(|source| failure(&pending.id, self.cost.name(), source))?;
        let security = self
            .security
            .run(&pending.resource)
            .map_err(|source| failure(&pending.id, self.security.name(), source))?;

        trace!(id = %pending.id, severity = security.severity, "Resource checked");

        let mut resource = pending.resource;
        let renamed = resource.rename_reserved_keys();
        if !renamed.is_empty() {
            debug!(
                id = %pending.id,
                ?renamed,
                "Renamed state fields clashing with report fields"
            );
        }

        Ok(CheckedResource {
            id: pending.id,
            resource,
            cost,
            security,
        })
    }

    /// Check every resource, stopping at the first failure.
    pub fn dispatch_all(&self, pending: Vec<PendingResource>) -> Result<Vec<CheckedResource>> {
        pending
            .into_iter()
            .map(|resource| self.dispatch(resource))
            .collect()
    }
}

impl std::fmt::Debug for CheckDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckDispatcher")
            .field("cost", &self.cost.name())
            .field("security", &self.security.name())
            .finish()
    }
}

fn failure(resource: &str, checker: &str, source: CheckError) -> ReportError {
    ReportError::CheckerFailure {
        resource: resource.to_string(),
        checker: checker.to_string(),
        source,
    }
}
