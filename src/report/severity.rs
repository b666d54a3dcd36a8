//! Project-level severity.

use super::CheckedResource;

/// Severity of a report without resources.
pub const NO_SEVERITY: i64 = -1;

/// Highest security severity across resources, [`NO_SEVERITY`] when empty.
///
/// Plain integer maximum: negative severities are compared as they are.
pub fn aggregate_severity(resources: &[CheckedResource]) -> i64 {
    resources
        .iter()
        .map(|resource| resource.security.severity)
        .max()
        .unwrap_or(NO_SEVERITY)
}
