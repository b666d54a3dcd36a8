//! Pluggable per-resource checks.
//!
//! A [`Checker`] turns one resource into a verdict. Cost checkers produce an
//! opaque [`CostVerdict`]; security checkers produce a [`SecurityVerdict`]
//! carrying a numeric severity. The [`CheckDispatcher`] runs one of each for
//! every managed resource.

pub mod dispatch;
pub mod pricing;
pub mod registry;
pub mod rules;

pub use dispatch::CheckDispatcher;
pub use pricing::PriceTableCostChecker;
pub use registry::CheckerRegistry;
pub use rules::{RuleSecurityChecker, SecurityRule, SecurityRuleConfig};

use crate::state::RawResource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Failure of a single check.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("No checker registered for resource type '{0}'")]
    NoChecker(String),

    #[error("{0}")]
    Failed(String),
}

/// Analysis unit producing one verdict per resource.
pub trait Checker: Send + Sync {
    /// Verdict attached to the checked resource.
    type Verdict;

    /// Get the name of this checker.
    fn name(&self) -> &str;

    /// Check one resource.
    fn run(&self, resource: &RawResource) -> Result<Self::Verdict, CheckError>;
}

/// Object-safe alias for cost checkers.
pub type CostChecker = dyn Checker<Verdict = CostVerdict>;

/// Object-safe alias for security checkers.
pub type SecurityChecker = dyn Checker<Verdict = SecurityVerdict>;

impl<C: Checker + ?Sized> Checker for Box<C> {
    type Verdict = C::Verdict;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, resource: &RawResource) -> Result<Self::Verdict, CheckError> {
        (**self).run(resource)
    }
}

/// Cost checker output, attached to the report verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostVerdict(pub Value);

impl CostVerdict {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Security checker output. Higher severity is worse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityVerdict {
    pub severity: i64,
    /// Checker-specific details, flattened next to `severity`.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl SecurityVerdict {
    pub fn new(severity: i64) -> Self {
        Self {
            severity,
            details: Map::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: Value) -> Self {
        self.details.insert(key.to_string(), value);
        self
    }
}
