//! Filesystem project store.

use super::{CONFIG_OBJECT, ProjectStore};
use crate::error::{ReportError, Result};
use crate::types::ProjectId;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Project store rooted at a local directory, one subdirectory per project.
#[derive(Debug, Clone)]
pub struct FsProjectStore {
    root: PathBuf,
}

impl FsProjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        key.split('/').fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

fn unavailable(key: &str, source: std::io::Error) -> ReportError {
    ReportError::StorageUnavailable {
        key: key.to_string(),
        source,
    }
}

impl ProjectStore for FsProjectStore {
    fn read_object(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        trace!(path = %path.display(), "Reading object");
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(unavailable(key, e)),
        }
    }

    fn write_object(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| unavailable(key, e))?;
        }

        // Write-then-rename so readers never see a partial object.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes).map_err(|e| unavailable(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| unavailable(key, e))?;
        debug!(path = %path.display(), bytes = bytes.len(), "Wrote object");
        Ok(())
    }

    fn list_projects(&self) -> Result<Vec<ProjectId>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(unavailable(&self.root.display().to_string(), e)),
        };

        let mut projects = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| unavailable(&self.root.display().to_string(), e))?;
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if let Ok(project) = ProjectId::new(name)
                && entry.path().join(CONFIG_OBJECT).is_file()
            {
                projects.push(project);
            }
        }
        projects.sort();
        Ok(projects)
    }
}
