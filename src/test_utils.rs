#[cfg(test)]
pub mod fixtures {
    use crate::checks::{CostVerdict, SecurityVerdict};
    use crate::report::{CheckedResource, ProjectConfig, Report, aggregate_severity};
    use crate::state::{RawResource, ResourceMode, StateMetadata};
    use crate::types::ProjectId;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;

    /// State from the end-to-end scenario: one managed and one data resource.
    pub const TWO_RESOURCE_STATE: &str = r#"{"version":4,"resources":[{"mode":"managed","type":"x","name":"a"},{"mode":"data","type":"y","name":"b"}]}"#;

    pub fn project(id: &str) -> ProjectId {
        ProjectId::new(id).unwrap()
    }

    pub fn demo_config() -> ProjectConfig {
        ProjectConfig::new("demo", "ops@example.com", "t0k3n")
    }

    pub fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 25, 12, 0, 0).unwrap()
    }

    pub fn checked(id: &str, severity: i64) -> CheckedResource {
        CheckedResource {
            id: id.to_string(),
            resource: RawResource::new(ResourceMode::Managed, "test_resource", id),
            cost: CostVerdict::new(json!({"monthly": 1.5})),
            security: SecurityVerdict::new(severity),
        }
    }

    pub fn sample_report(resources: Vec<CheckedResource>) -> Report {
        Report {
            config: demo_config(),
            metadata: StateMetadata {
                version: 4,
                terraform_version: Some("1.6.2".to_string()),
                serial: 3,
            },
            severity: aggregate_severity(&resources),
            resources,
            generated_at: fixed_time(),
            format_version: "0.1.0".to_string(),
        }
    }
}

#[cfg(test)]
pub mod checkers {
    use crate::checks::{CheckError, Checker, CostVerdict, SecurityVerdict};
    use crate::state::RawResource;
    use serde_json::Value;
    use std::collections::HashMap;
    use std::marker::PhantomData;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Cost checker returning the same verdict for every resource.
    pub struct StaticCost(Value);

    impl StaticCost {
        pub fn new(value: Value) -> Self {
            Self(value)
        }
    }

    impl Checker for StaticCost {
        type Verdict = CostVerdict;

        fn name(&self) -> &str {
            "static-cost"
        }

        fn run(&self, _resource: &RawResource) -> Result<CostVerdict, CheckError> {
            Ok(CostVerdict::new(self.0.clone()))
        }
    }

    /// Security checker looking severities up by resource name (default 0).
    pub struct SeverityByName(HashMap<String, i64>);

    impl SeverityByName {
        pub fn new(severities: &[(&str, i64)]) -> Self {
            Self(
                severities
                    .iter()
                    .map(|(name, severity)| (name.to_string(), *severity))
                    .collect(),
            )
        }
    }

    impl Checker for SeverityByName {
        type Verdict = SecurityVerdict;

        fn name(&self) -> &str {
            "severity-by-name"
        }

        fn run(&self, resource: &RawResource) -> Result<SecurityVerdict, CheckError> {
            let severity = self.0.get(&resource.name).copied().unwrap_or(0);
            Ok(SecurityVerdict::new(severity))
        }
    }

    /// Security checker with a fixed name and severity.
    pub struct FixedSeverity {
        name: String,
        severity: i64,
    }

    impl FixedSeverity {
        pub fn named(name: &str, severity: i64) -> Self {
            Self {
                name: name.to_string(),
                severity,
            }
        }
    }

    impl Checker for FixedSeverity {
        type Verdict = SecurityVerdict;

        fn name(&self) -> &str {
            &self.name
        }

        fn run(&self, _resource: &RawResource) -> Result<SecurityVerdict, CheckError> {
            Ok(SecurityVerdict::new(self.severity))
        }
    }

    /// Checker that always fails.
    pub struct FailingChecker<V> {
        name: String,
        _verdict: PhantomData<fn() -> V>,
    }

    impl<V> FailingChecker<V> {
        pub fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                _verdict: PhantomData,
            }
        }
    }

    impl<V> Checker for FailingChecker<V> {
        type Verdict = V;

        fn name(&self) -> &str {
            &self.name
        }

        fn run(&self, _resource: &RawResource) -> Result<V, CheckError> {
            Err(CheckError::Failed("checker unavailable".to_string()))
        }
    }

    /// Cost checker counting its calls and failing on one resource name.
    pub struct CountingChecker {
        calls: Arc<AtomicUsize>,
        fail_on: Option<String>,
    }

    impl CountingChecker {
        pub fn new(calls: Arc<AtomicUsize>, fail_on: Option<&str>) -> Self {
            Self {
                calls,
                fail_on: fail_on.map(str::to_string),
            }
        }
    }

    impl Checker for CountingChecker {
        type Verdict = CostVerdict;

        fn name(&self) -> &str {
            "counting"
        }

        fn run(&self, resource: &RawResource) -> Result<CostVerdict, CheckError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on.as_deref() == Some(resource.name.as_str()) {
                return Err(CheckError::Failed(format!("cannot price {}", resource.name)));
            }
            Ok(CostVerdict::new(Value::Null))
        }
    }
}

#[cfg(test)]
pub mod stores {
    use crate::error::{ReportError, Result};
    use crate::store::ProjectStore;
    use crate::types::ProjectId;

    /// Store whose every operation fails as unavailable.
    pub struct UnavailableStore;

    fn unavailable(key: &str) -> ReportError {
        ReportError::StorageUnavailable {
            key: key.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "offline"),
        }
    }

    impl ProjectStore for UnavailableStore {
        fn read_object(&self, key: &str) -> Result<Option<Vec<u8>>> {
            Err(unavailable(key))
        }

        fn write_object(&self, key: &str, _bytes: &[u8]) -> Result<()> {
            Err(unavailable(key))
        }

        fn list_projects(&self) -> Result<Vec<ProjectId>> {
            Err(unavailable(""))
        }
    }
}
