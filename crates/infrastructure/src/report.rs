//! Human-readable and JSON rendering of suite reports.

use restcheck_domain::{CaseOutcome, CaseReport, SuiteReport};
use serde::Deserialize;

/// Output format of the printed report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Per-case PASS/FAIL listing.
    #[default]
    Text,
    /// The full report as pretty-printed JSON.
    Json,
}

impl ReportFormat {
    /// Renders `report` in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(self, report: &SuiteReport) -> serde_json::Result<String> {
        match self {
            Self::Text => Ok(render_text(report)),
            Self::Json => render_json(report),
        }
    }
}

/// Renders a per-case pass/fail listing followed by a summary line.
#[must_use]
pub fn render_text(report: &SuiteReport) -> String {
    let mut lines = vec![report.suite_name.clone()];
    for case in &report.cases {
        lines.extend(case_lines(case));
    }
    lines.push(String::new());
    lines.push(format!(
        "{} passed, {} failed, {} total ({:.0}% in {} ms)",
        report.passed,
        report.failed,
        report.total,
        report.pass_rate(),
        report.duration_ms
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn case_lines(case: &CaseReport) -> Vec<String> {
    let mark = if case.passed() { "PASS" } else { "FAIL" };
    let status = case
        .status
        .map_or_else(|| "no response".to_string(), |s| s.to_string());
    let mut lines = vec![format!(
        "  {mark}  {}  [{} {} -> {status}, {} ms]",
        case.name, case.method, case.url, case.duration_ms
    )];

    match &case.outcome {
        CaseOutcome::Passed => {}
        CaseOutcome::AssertionsFailed(_) => {
            lines.extend(case.failed_assertions().map(|failure| {
                format!(
                    "        - {}: {}",
                    failure.assertion.description(),
                    failure.error.as_deref().unwrap_or("failed")
                )
            }));
        }
        other => lines.push(format!("        - {}", other.summary())),
    }
    lines
}

/// Serializes the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(report: &SuiteReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
