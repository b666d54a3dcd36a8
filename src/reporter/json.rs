use crate::report::{ListedReport, Report};
use crate::reporter::Reporter;

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn report(&self, report: &Report) -> String {
        serde_json::to_string_pretty(report)
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize report: {}"}}"#, e))
    }

    fn report_list(&self, reports: &[ListedReport]) -> String {
        serde_json::to_string_pretty(reports)
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize reports: {}"}}"#, e))
    }
}
