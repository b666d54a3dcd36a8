use crate::report::{CheckedResource, ListedReport, NO_SEVERITY, Report};
use crate::reporter::Reporter;
use colored::Colorize;

pub struct TerminalReporter {
    verbose: bool,
    /// Severity at or above which values are highlighted as failures.
    fail_on: Option<i64>,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            fail_on: None,
        }
    }

    pub fn with_fail_on(mut self, fail_on: Option<i64>) -> Self {
        self.fail_on = fail_on;
        self
    }

    fn severity_color(&self, severity: i64) -> colored::ColoredString {
        let label = format!("[{}]", severity);
        match severity {
            s if s <= NO_SEVERITY => label.dimmed(),
            s if self.fail_on.is_some_and(|limit| s >= limit) => label.red().bold(),
            0 => label.green(),
            _ => label.yellow().bold(),
        }
    }

    fn format_cost(&self, resource: &CheckedResource) -> String {
        let value = resource.cost.as_value();
        match (
            value.get("monthly").and_then(|m| m.as_f64()),
            value.get("currency").and_then(|c| c.as_str()),
        ) {
            (Some(monthly), Some(currency)) => format!("{:.2} {}/month", monthly, currency),
            (Some(monthly), None) => format!("{:.2}/month", monthly),
            _ => "-".to_string(),
        }
    }

    fn format_resource(&self, resource: &CheckedResource) -> String {
        let mut output = format!(
            "  {} {} ({}) {}\n",
            self.severity_color(resource.security.severity),
            resource.id.bold(),
            resource.resource.resource_type,
            self.format_cost(resource).dimmed()
        );

        if self.verbose
            && let Some(findings) = resource
                .security
                .details
                .get("findings")
                .and_then(|f| f.as_array())
        {
            for finding in findings {
                let rule = finding.get("rule").and_then(|r| r.as_str()).unwrap_or("?");
                let message = finding.get("message").and_then(|m| m.as_str()).unwrap_or("");
                output.push_str(&format!("      {}: {}\n", rule.cyan(), message));
            }
        }

        output
    }

    fn format_summary(&self, report: &Report) -> String {
        let total_cost: f64 = report
            .resources
            .iter()
            .filter_map(|r| r.cost.as_value().get("monthly").and_then(|m| m.as_f64()))
            .sum();

        format!(
            "{} resources, estimated {:.2}/month, severity {}\n",
            report.resources.len(),
            total_cost,
            self.severity_color(report.severity)
        )
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, report: &Report) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} (owner {})\n",
            "Project".bold(),
            report.config.name.bold(),
            report.config.owner
        ));
        output.push_str(&format!(
            "State version {}, terraform {}, serial {}\n",
            report.metadata.version,
            report.metadata.terraform_version.as_deref().unwrap_or("unknown"),
            report.metadata.serial
        ));
        output.push_str(&format!(
            "Generated {}\n\n",
            report.generated_at.to_rfc3339().dimmed()
        ));

        if report.resources.is_empty() {
            output.push_str(&format!("  {}\n", "No managed resources.".dimmed()));
        }
        for resource in &report.resources {
            output.push_str(&self.format_resource(resource));
        }

        output.push('\n');
        output.push_str(&self.format_summary(report));
        output
    }

    fn report_list(&self, reports: &[ListedReport]) -> String {
        if reports.is_empty() {
            return format!("{}\n", "No projects found.".dimmed());
        }

        reports
            .iter()
            .map(|listed| {
                format!(
                    "{} {} {} ({} resources)\n",
                    self.severity_color(listed.report.severity),
                    listed.id.to_string().bold(),
                    listed.report.config.name,
                    listed.report.resources.len()
                )
            })
            .collect()
    }
}
