//! Configuration for statescope.
//!
//! ## Layers
//! - `types`: Configuration type definitions
//! - `loading`: File discovery and parsing

mod error;
mod loading;
mod types;

pub use error::ConfigError;
pub use loading::CONFIG_FILE_NAMES;
pub use types::{
    Config, CostConfig, CostFamilyConfig, ReportConfig, SecurityConfig, SecurityFamilyConfig,
    StoreConfig,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.root, PathBuf::from("projects"));
        assert_eq!(config.cost.currency, "USD");
        assert!(config.security.rules.is_empty());
        assert_eq!(config.security.default_severity, 0);
        assert!(config.report.fail_on.is_none());
    }

    #[test]
    fn test_load_yaml_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".statescope.yaml"),
            r#"
store:
  root: /var/lib/statescope
report:
  fail_on: 3
security:
  default_severity: 0
  rules:
    - id: SEC-001
      resource_type: "^aws_s3_bucket$"
      attribute: acl
      equals: public-read
      severity: 3
      message: Bucket is world readable
cost:
  currency: EUR
  prices:
    aws_instance: 8.5
"#,
        )
        .unwrap();

        let config = Config::load(Some(dir.path())).unwrap();
        assert_eq!(config.store.root, PathBuf::from("/var/lib/statescope"));
        assert_eq!(config.report.fail_on, Some(3));
        assert_eq!(config.security.rules.len(), 1);
        assert_eq!(config.security.rules[0].equals, Some(serde_json::json!("public-read")));
        assert_eq!(config.cost.currency, "EUR");
        assert_eq!(config.cost.prices["aws_instance"], 8.5);
    }

    #[test]
    fn test_load_family_sections() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".statescope.yaml"),
            r#"
security:
  families:
    aws_s3_:
      default_severity: 1
      rules:
        - id: S3-PUBLIC
          resource_type: "^aws_s3_bucket$"
          attribute: acl
          equals: public-read
          severity: 4
cost:
  families:
    google_:
      currency: EUR
      prices:
        google_compute_instance: 25.0
"#,
        )
        .unwrap();

        let config = Config::load(Some(dir.path())).unwrap();
        let s3 = &config.security.families["aws_s3_"];
        assert_eq!(s3.default_severity, Some(1));
        assert_eq!(s3.rules[0].id, "S3-PUBLIC");
        let google = &config.cost.families["google_"];
        assert_eq!(google.currency.as_deref(), Some("EUR"));
        assert_eq!(google.prices["google_compute_instance"], 25.0);
        assert!(config.security.rules.is_empty());
    }

    #[test]
    fn test_load_json_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".statescope.json"),
            r#"{"report": {"format_version": "2.0"}}"#,
        )
        .unwrap();

        let config = Config::load(Some(dir.path())).unwrap();
        assert_eq!(config.report.format_version.as_deref(), Some("2.0"));
        assert_eq!(config.cost.currency, "USD");
    }

    #[test]
    fn test_load_toml_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".statescope.toml"),
            r#"
[security]
default_severity = 1

[[security.rules]]
id = "SEC-010"
resource_type = "^aws_security_group$"
attribute = "ingress.0.cidr_blocks"
severity = 4
"#,
        )
        .unwrap();

        let config = Config::load(Some(dir.path())).unwrap();
        assert_eq!(config.security.default_severity, 1);
        assert_eq!(config.security.rules[0].id, "SEC-010");
        assert!(config.security.rules[0].equals.is_none());
    }

    #[test]
    fn test_yaml_preferred_over_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".statescope.yaml"), "cost:\n  currency: GBP\n").unwrap();
        fs::write(dir.path().join(".statescope.json"), r#"{"cost": {"currency": "JPY"}}"#)
            .unwrap();

        let config = Config::load(Some(dir.path())).unwrap();
        assert_eq!(config.cost.currency, "GBP");
    }

    #[test]
    fn test_broken_config_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".statescope.yaml"), "store: [unclosed").unwrap();

        let err = Config::load(Some(dir.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseYaml { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "x=1").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported config format"));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/.statescope.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
