pub mod json;
pub mod terminal;

use crate::report::SecurityReport;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

pub trait Reporter {
    fn report(&self, report: &SecurityReport) -> String;
}
