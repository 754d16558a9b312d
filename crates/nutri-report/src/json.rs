use crate::report::ComparisonReport;

/// Pretty-printed JSON of the report.
pub fn render_json(report: &ComparisonReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
