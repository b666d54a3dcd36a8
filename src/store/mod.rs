//! Project storage.
//!
//! Projects are laid out as objects under a per-project prefix:
//!
//! ```text
//! <project>/config.json        project config
//! <project>/terraform.tfstate  raw Terraform state
//! <project>/report.json        last generated report
//! ```
//!
//! Backends only provide object reads, writes and project enumeration; the
//! project-level operations are shared.

pub mod fs;
pub mod memory;

pub use fs::FsProjectStore;
pub use memory::MemoryProjectStore;

use crate::error::{ReportError, Result};
use crate::report::{ProjectConfig, Report};
use crate::types::ProjectId;
use tracing::debug;

pub const CONFIG_OBJECT: &str = "config.json";
pub const STATE_OBJECT: &str = "terraform.tfstate";
pub const REPORT_OBJECT: &str = "report.json";

/// Storage key of a project object.
pub fn object_key(project: &ProjectId, object: &str) -> String {
    format!("{}/{}", project, object)
}

/// Storage backend holding project configs, states and reports.
pub trait ProjectStore: Send + Sync {
    /// Read an object; `Ok(None)` when it does not exist.
    fn read_object(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Create or replace an object.
    fn write_object(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Projects that have a config object, sorted.
    fn list_projects(&self) -> Result<Vec<ProjectId>>;

    /// Project config, or the placeholder config when none is stored.
    fn get_config(&self, project: &ProjectId) -> Result<ProjectConfig> {
        let key = object_key(project, CONFIG_OBJECT);
        match self.read_object(&key)? {
            Some(bytes) => decode(&key, &bytes),
            None => {
                debug!(%project, "No config stored, using placeholder");
                Ok(ProjectConfig::placeholder())
            }
        }
    }

    /// Raw Terraform state, if any.
    fn get_raw_state(&self, project: &ProjectId) -> Result<Option<Vec<u8>>> {
        self.read_object(&object_key(project, STATE_OBJECT))
    }

    /// Raw Terraform state, failing with [`ReportError::MissingState`] when
    /// none is stored.
    fn require_raw_state(&self, project: &ProjectId) -> Result<Vec<u8>> {
        self.get_raw_state(project)?
            .ok_or_else(|| ReportError::MissingState(project.clone()))
    }

    /// Persist a report as pretty-printed JSON.
    fn put_report(&self, project: &ProjectId, report: &Report) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(report)?;
        self.write_object(&object_key(project, REPORT_OBJECT), &bytes)
    }

    /// Last persisted report, if any.
    fn get_report(&self, project: &ProjectId) -> Result<Option<Report>> {
        let key = object_key(project, REPORT_OBJECT);
        self.read_object(&key)?
            .map(|bytes| decode(&key, &bytes))
            .transpose()
    }
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| ReportError::CorruptRecord {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{checked, demo_config, project, sample_report};

    #[test]
    fn test_object_key() {
        assert_eq!(object_key(&project("p1"), REPORT_OBJECT), "p1/report.json");
    }

    #[test]
    fn test_get_config_placeholder_when_absent() {
        let store = MemoryProjectStore::new();
        let config = store.get_config(&project("p1")).unwrap();
        assert!(config.is_placeholder());
    }

    #[test]
    fn test_get_config_decodes_stored() {
        let store = MemoryProjectStore::new()
            .with_config(&project("p1"), &demo_config())
            .unwrap();
        assert_eq!(store.get_config(&project("p1")).unwrap(), demo_config());
    }

    #[test]
    fn test_get_config_corrupt_is_error() {
        let store = MemoryProjectStore::new().with_object("p1/config.json", b"{not json");
        let err = store.get_config(&project("p1")).unwrap_err();
        assert!(matches!(err, ReportError::CorruptRecord { ref key, .. } if key == "p1/config.json"));
    }

    #[test]
    fn test_require_raw_state() {
        let store = MemoryProjectStore::new().with_state(&project("p1"), "{}");
        assert_eq!(store.require_raw_state(&project("p1")).unwrap(), b"{}".to_vec());

        let err = store.require_raw_state(&project("p2")).unwrap_err();
        assert!(matches!(err, ReportError::MissingState(ref p) if *p == project("p2")));
    }

    #[test]
    fn test_raw_state_absent() {
        let store = MemoryProjectStore::new();
        assert!(store.get_raw_state(&project("p1")).unwrap().is_none());
    }

    #[test]
    fn test_report_put_then_get() {
        let store = MemoryProjectStore::new();
        let report = sample_report(vec![checked("a", 1)]);

        assert!(store.get_report(&project("p1")).unwrap().is_none());
        store.put_report(&project("p1"), &report).unwrap();
        assert_eq!(store.get_report(&project("p1")).unwrap(), Some(report));
    }

    #[test]
    fn test_put_report_writes_pretty_json() {
        let store = MemoryProjectStore::new();
        store
            .put_report(&project("p1"), &sample_report(Vec::new()))
            .unwrap();
        let bytes = store.read_object("p1/report.json").unwrap().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\n  \"config\": {"));
    }
}
