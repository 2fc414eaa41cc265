use crate::report::SecurityReport;
use crate::reporter::Reporter;

/// Pretty-printed JSON, the same shape as the report artifact on disk.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn report(&self, report: &SecurityReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }
}
