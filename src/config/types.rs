//! Configuration type definitions.

use crate::checks::SecurityRuleConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration structure for statescope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project store location.
    pub store: StoreConfig,
    /// Report generation settings.
    pub report: ReportConfig,
    /// Security rules.
    pub security: SecurityConfig,
    /// Cost price table.
    pub cost: CostConfig,
}

/// Project store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one subdirectory per project.
    pub root: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("projects"),
        }
    }
}

/// Report generation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Version string stamped into generated reports (defaults to the
    /// crate version).
    pub format_version: Option<String>,
    /// Report severity at or above which `report` exits with status 1.
    pub fail_on: Option<i64>,
}

/// Security checker configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Severity of resources no rule matches.
    pub default_severity: i64,
    /// Rules applied to resources no family claims.
    pub rules: Vec<SecurityRuleConfig>,
    /// Rule sets keyed by resource-type prefix (`aws_`, `google_`). The
    /// longest matching prefix replaces the top-level rules.
    pub families: BTreeMap<String, SecurityFamilyConfig>,
}

/// Security rules for one resource-type family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityFamilyConfig {
    /// Severity of unmatched resources; inherits the top-level default.
    pub default_severity: Option<i64>,
    pub rules: Vec<SecurityRuleConfig>,
}

/// Cost checker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Currency label attached to cost verdicts.
    pub currency: String,
    /// Monthly price per instance, by resource type.
    pub prices: BTreeMap<String, f64>,
    /// Price tables keyed by resource-type prefix, replacing the top-level
    /// table for the types they claim.
    pub families: BTreeMap<String, CostFamilyConfig>,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            prices: BTreeMap::new(),
            families: BTreeMap::new(),
        }
    }
}

/// Price table for one resource-type family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostFamilyConfig {
    /// Currency label; inherits the top-level currency.
    pub currency: Option<String>,
    pub prices: BTreeMap<String, f64>,
}
