//! Report data model.

pub mod severity;

pub use severity::{NO_SEVERITY, aggregate_severity};

use crate::checks::{CostVerdict, SecurityVerdict};
use crate::state::{RawResource, StateMetadata};
use crate::types::{ProjectId, ProjectToken};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Value used for every field of the placeholder project config.
pub const INVALID_CONFIG_VALUE: &str = "invalid";

/// Project settings owned by the project store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub owner: String,
    pub token: ProjectToken,
}

impl ProjectConfig {
    pub fn new(name: &str, owner: &str, token: &str) -> Self {
        Self {
            name: name.to_string(),
            owner: owner.to_string(),
            token: ProjectToken::new(token),
        }
    }

    /// Config reported for projects that have none stored yet.
    pub fn placeholder() -> Self {
        Self::new(INVALID_CONFIG_VALUE, INVALID_CONFIG_VALUE, INVALID_CONFIG_VALUE)
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

/// A managed resource with its id and check verdicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckedResource {
    pub id: String,
    #[serde(flatten)]
    pub resource: RawResource,
    pub cost: CostVerdict,
    pub security: SecurityVerdict,
}

/// Cost and security report for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub config: ProjectConfig,
    pub metadata: StateMetadata,
    pub resources: Vec<CheckedResource>,
    pub generated_at: DateTime<Utc>,
    /// Highest resource severity, or [`NO_SEVERITY`] without resources.
    pub severity: i64,
    #[serde(default)]
    pub format_version: String,
}

impl Report {
    pub fn resource(&self, id: &str) -> Option<&CheckedResource> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn has_resources(&self) -> bool {
        !self.resources.is_empty()
    }
}

/// A stored report tagged with its project, as returned by listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedReport {
    pub id: ProjectId,
    #[serde(flatten)]
    pub report: Report,
}
