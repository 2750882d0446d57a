//! JSON output.

use crate::ReportError;
use serde::Serialize;
use tagcheck_checker::Report;

#[derive(Serialize)]
struct Output<'a> {
    passed: bool,
    report: &'a Report,
}

/// Serialize a report as pretty-printed JSON with a `passed` flag on top.
pub fn render(report: &Report) -> Result<String, ReportError> {
    let output = Output {
        passed: report.passed(),
        report,
    };
    serde_json::to_string_pretty(&output).map_err(|e| ReportError {
        message: e.to_string(),
    })
}
