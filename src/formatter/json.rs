use serde::Serialize;

use crate::collector::TargetReport;

/// Report as emitted downstream: the report fields plus a collection timestamp
#[derive(Debug, Clone, Serialize)]
pub struct ReportJson<'a> {
    pub timestamp: String,
    #[serde(flatten)]
    pub report: &'a TargetReport,
}

/// JSON formatter for poll reports
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format_report(report: &TargetReport) -> ReportJson<'_> {
        ReportJson {
            timestamp: chrono::Utc::now().to_rfc3339(),
            report,
        }
    }

    /// Single-line JSON, one report per line
    pub fn to_json_line(report: &TargetReport) -> serde_json::Result<String> {
        serde_json::to_string(&Self::format_report(report))
    }
}
