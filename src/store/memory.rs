//! In-memory project store.

use super::{CONFIG_OBJECT, ProjectStore, STATE_OBJECT, object_key};
use crate::error::Result;
use crate::report::ProjectConfig;
use crate::types::ProjectId;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

/// Project store kept in memory, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(self, key: &str, bytes: &[u8]) -> Self {
        self.insert(key, bytes);
        self
    }

    pub fn with_config(self, project: &ProjectId, config: &ProjectConfig) -> Result<Self> {
        let bytes = serde_json::to_vec(config)?;
        Ok(self.with_object(&object_key(project, CONFIG_OBJECT), &bytes))
    }

    pub fn with_state(self, project: &ProjectId, state: &str) -> Self {
        self.with_object(&object_key(project, STATE_OBJECT), state.as_bytes())
    }

    pub fn insert(&self, key: &str, bytes: &[u8]) {
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), bytes.to_vec());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl ProjectStore for MemoryProjectStore {
    fn read_object(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn write_object(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.insert(key, bytes);
        Ok(())
    }

    fn list_projects(&self) -> Result<Vec<ProjectId>> {
        let suffix = format!("/{}", CONFIG_OBJECT);
        Ok(self
            .keys()
            .iter()
            .filter_map(|key| key.strip_suffix(&suffix))
            .filter_map(|prefix| ProjectId::new(prefix).ok())
            .collect())
    }
}
