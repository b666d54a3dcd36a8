//! Routing of resources to per-family checkers.

use super::{CheckError, Checker};
use crate::state::RawResource;
use tracing::trace;

/// Checker that routes each resource to the checker registered for its
/// resource-type family.
///
/// Families are type prefixes such as `aws_` or `google_compute_`. The
/// longest matching prefix wins; resources matching no family go to the
/// fallback, and with no fallback the check fails with
/// [`CheckError::NoChecker`].
pub struct CheckerRegistry<V> {
    name: String,
    families: Vec<(String, Box<dyn Checker<Verdict = V>>)>,
    fallback: Option<Box<dyn Checker<Verdict = V>>>,
}

impl<V: 'static> CheckerRegistry<V> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            families: Vec::new(),
            fallback: None,
        }
    }

    /// Register a checker for every resource type starting with `prefix`.
    /// Registering the same prefix twice replaces the earlier checker.
    pub fn register(
        mut self,
        prefix: &str,
        checker: impl Checker<Verdict = V> + 'static,
    ) -> Self {
        self.families.retain(|(existing, _)| existing != prefix);
        self.families.push((prefix.to_string(), Box::new(checker)));
        self
    }

    /// Checker used for resource types no family claims.
    pub fn with_fallback(mut self, checker: impl Checker<Verdict = V> + 'static) -> Self {
        self.fallback = Some(Box::new(checker));
        self
    }

    /// Registered family prefixes, in registration order.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(|(prefix, _)| prefix.as_str())
    }

    /// Checker responsible for a resource type, if any.
    pub fn route(&self, resource_type: &str) -> Option<&dyn Checker<Verdict = V>> {
        self.families
            .iter()
            .filter(|(prefix, _)| resource_type.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, checker)| checker.as_ref())
            .or(self.fallback.as_deref())
    }
}

impl<V: 'static> Checker for CheckerRegistry<V> {
    type Verdict = V;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, resource: &RawResource) -> Result<V, CheckError> {
        let checker = self
            .route(&resource.resource_type)
            .ok_or_else(|| CheckError::NoChecker(resource.resource_type.clone()))?;
        trace!(
            resource_type = %resource.resource_type,
            checker = checker.name(),
            "Routing resource"
        );
        checker.run(resource)
    }
}
