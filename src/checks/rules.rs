//! Rule-based security checker driven by configuration.

use super::{CheckError, Checker, CheckerRegistry, SecurityVerdict};
use crate::config::{ConfigError, SecurityConfig};
use crate::state::RawResource;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Security rule as written in the config file.
///
/// ```yaml
/// security:
///   rules:
///     - id: SEC-001
///       resource_type: "^aws_s3_bucket$"
///       attribute: acl
///       equals: public-read
///       severity: 3
///       message: Bucket is world readable
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityRuleConfig {
    pub id: String,
    /// Regex matched against the resource type.
    pub resource_type: String,
    /// Dotted path (`ingress.0.cidr_blocks`) or JSON pointer into the
    /// attributes of each resource instance.
    #[serde(default)]
    pub attribute: Option<String>,
    /// Value the attribute must equal; without it any truthy value matches.
    #[serde(default)]
    pub equals: Option<Value>,
    pub severity: i64,
    #[serde(default)]
    pub message: String,
}

/// A compiled security rule.
#[derive(Debug, Clone)]
pub struct SecurityRule {
    pub id: String,
    pub resource_type: Regex,
    pub pointer: Option<String>,
    pub equals: Option<Value>,
    pub severity: i64,
    pub message: String,
}

impl SecurityRule {
    pub fn compile(config: &SecurityRuleConfig) -> Result<Self, ConfigError> {
        let resource_type =
            Regex::new(&config.resource_type).map_err(|e| ConfigError::InvalidPattern {
                rule_id: config.id.clone(),
                pattern: config.resource_type.clone(),
                source: e,
            })?;

        Ok(Self {
            id: config.id.clone(),
            resource_type,
            pointer: config.attribute.as_deref().map(to_pointer),
            equals: config.equals.clone(),
            severity: config.severity,
            message: config.message.clone(),
        })
    }

    /// Check if a resource matches this rule.
    pub fn matches(&self, resource: &RawResource) -> bool {
        if !self.resource_type.is_match(&resource.resource_type) {
            return false;
        }
        let Some(pointer) = &self.pointer else {
            return true;
        };

        resource
            .instance_attributes()
            .into_iter()
            .filter_map(|attrs| attrs.pointer(pointer))
            .any(|value| match &self.equals {
                Some(expected) => value == expected,
                None => is_truthy(value),
            })
    }
}

/// Security checker applying every configured rule to each resource.
///
/// The verdict severity is the highest severity among matching rules, or
/// the configured default when none match.
#[derive(Debug, Clone)]
pub struct RuleSecurityChecker {
    rules: Vec<SecurityRule>,
    default_severity: i64,
}

impl RuleSecurityChecker {
    pub fn new(rules: Vec<SecurityRule>, default_severity: i64) -> Self {
        Self {
            rules,
            default_severity,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(compile_all(&config.rules)?, config.default_severity))
    }

    /// Security checker for the whole `security` section: one rule set per
    /// family, with the top-level rules as fallback.
    pub fn registry(
        config: &SecurityConfig,
    ) -> Result<CheckerRegistry<SecurityVerdict>, ConfigError> {
        let mut registry =
            CheckerRegistry::new("security").with_fallback(Self::from_config(config)?);
        for (prefix, family) in &config.families {
            let rules = compile_all(&family.rules)?;
            let default_severity = family.default_severity.unwrap_or(config.default_severity);
            registry = registry.register(prefix, Self::new(rules, default_severity));
        }
        Ok(registry)
    }

    pub fn rules(&self) -> &[SecurityRule] {
        &self.rules
    }
}

fn compile_all(rules: &[SecurityRuleConfig]) -> Result<Vec<SecurityRule>, ConfigError> {
    rules.iter().map(SecurityRule::compile).collect()
}

impl Checker for RuleSecurityChecker {
    type Verdict = SecurityVerdict;

    fn name(&self) -> &str {
        "rules"
    }

    fn run(&self, resource: &RawResource) -> Result<SecurityVerdict, CheckError> {
        let matched: Vec<&SecurityRule> =
            self.rules.iter().filter(|rule| rule.matches(resource)).collect();

        let severity = matched
            .iter()
            .map(|rule| rule.severity)
            .max()
            .unwrap_or(self.default_severity);
        let findings: Vec<Value> = matched
            .iter()
            .map(|rule| {
                json!({
                    "rule": rule.id,
                    "severity": rule.severity,
                    "message": rule.message,
                })
            })
            .collect();

        Ok(SecurityVerdict::new(severity).with_detail("findings", Value::Array(findings)))
    }
}

fn to_pointer(path: &str) -> String {
    if path.starts_with('/') {
        return path.to_string();
    }
    path.split('.')
        .map(|segment| segment.replace('~', "~0").replace('/', "~1"))
        .fold(String::new(), |mut pointer, segment| {
            pointer.push('/');
            pointer.push_str(&segment);
            pointer
        })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Number(_) => true,
    }
}
