pub mod json;
pub mod terminal;

use crate::report::{ListedReport, Report};

pub trait Reporter {
    fn report(&self, report: &Report) -> String;
    fn report_list(&self, reports: &[ListedReport]) -> String;
}
