//! Managed resource extraction.

use super::document::{RawResource, StateDocument};
use std::collections::HashSet;
use tracing::{debug, warn};

/// A managed resource with its report id, waiting for its checks.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingResource {
    pub id: String,
    pub resource: RawResource,
}

/// Report id of a resource: `<module>.<name>` inside a module, else `<name>`.
pub fn resource_id(resource: &RawResource) -> String {
    match &resource.module {
        Some(module) => format!("{}.{}", module, resource.name),
        None => resource.name.clone(),
    }
}

/// Managed resources of a document, in document order.
pub fn extract_managed(document: &StateDocument) -> Vec<PendingResource> {
    if document.resources.is_empty() {
        debug!("State document has no resources");
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let pending: Vec<PendingResource> = document
        .resources
        .iter()
        .filter(|resource| resource.mode.is_managed())
        .map(|resource| {
            let id = resource_id(resource);
            if !seen.insert(id.clone()) {
                warn!(id = %id, "Duplicate resource id in state");
            }
            PendingResource {
                id,
                resource: resource.clone(),
            }
        })
        .collect();

    debug!(
        total = document.resources.len(),
        managed = pending.len(),
        "Extracted managed resources"
    );
    pending
}
