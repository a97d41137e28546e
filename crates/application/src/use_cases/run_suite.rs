//! Run suite use case.
//!
//! Executes the cases of a [`TestSuite`] strictly in declaration order. A
//! failing case never aborts the run (unless `stop_on_failure` is set); the
//! report lists every case that ran.

use std::time::Instant;

use chrono::Utc;
use restcheck_domain::request::RequestSpec;
use restcheck_domain::response::ResponseSpec;
use restcheck_domain::{
    Capture, CaseOutcome, CaseReport, RunState, SuiteReport, TestCase, TestSuite, json_path,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::ports::{HttpClient, ResponseVerifier};
use crate::variable_resolver::{resolve_assertions, resolve_request};

/// Use case for running a test suite against a live endpoint.
pub struct RunSuite<C: HttpClient, V: ResponseVerifier> {
    client: C,
    verifier: V,
    stop_on_failure: bool,
}

impl<C: HttpClient, V: ResponseVerifier> RunSuite<C, V> {
    /// Creates a new `RunSuite` use case.
    #[must_use]
    pub const fn new(client: C, verifier: V) -> Self {
        Self {
            client,
            verifier,
            stop_on_failure: false,
        }
    }

    /// Set whether to stop after the first failing case.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Runs every case of `suite` once, in order, with a fresh run state.
    pub async fn execute(&self, suite: &TestSuite) -> SuiteReport {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut state = RunState::new();
        let mut reports = Vec::with_capacity(suite.len());

        info!(suite = %suite.name, cases = suite.len(), "running suite");

        for case in &suite.cases {
            let report = self.run_case(case, &mut state).await;
            let failed = !report.passed();
            reports.push(report);

            if failed && self.stop_on_failure {
                warn!(case = %case.name, "stopping after first failure");
                break;
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;
        let report = SuiteReport::new(&suite.name, started_at, reports, duration_ms);
        info!(
            suite = %report.suite_name,
            passed = report.passed,
            failed = report.failed,
            duration_ms,
            "suite finished"
        );
        report
    }

    /// Runs one case, reading and writing the shared run state.
    pub async fn run_case(&self, case: &TestCase, state: &mut RunState) -> CaseReport {
        let start = Instant::now();
        let mut report = CaseReport {
            name: case.name.clone(),
            method: case.request.method,
            url: case.request.url.clone(),
            outcome: CaseOutcome::Passed,
            assertions: Vec::new(),
            status: None,
            duration_ms: 0,
        };

        report.outcome = match self.exchange(case, state, &mut report).await {
            Ok(()) => CaseOutcome::Passed,
            Err(outcome) => outcome,
        };

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;
        report.duration_ms = duration_ms;

        if report.passed() {
            info!(case = %report.name, duration_ms = report.duration_ms, "case passed");
        } else {
            warn!(case = %report.name, reason = %report.outcome.summary(), "case failed");
            for failure in report.failed_assertions() {
                warn!(
                    case = %report.name,
                    assertion = %failure.assertion.description(),
                    error = failure.error.as_deref().unwrap_or_default(),
                    "assertion failed"
                );
            }
        }

        report
    }

    async fn exchange(
        &self,
        case: &TestCase,
        state: &mut RunState,
        report: &mut CaseReport,
    ) -> Result<(), CaseOutcome> {
        let request = resolve_request(&case.request, state)
            .map_err(|e| CaseOutcome::UndefinedState(e.to_string()))?;
        let assertions = resolve_assertions(&case.assertions, state)
            .map_err(|e| CaseOutcome::UndefinedState(e.to_string()))?;
        report.url.clone_from(&request.url);

        let response = self.send(&request).await?;
        report.status = Some(response.status);

        report.assertions = self.verifier.verify(&assertions, &response);
        let failed = report.failed_assertions().count();
        if failed > 0 {
            return Err(CaseOutcome::AssertionsFailed(failed));
        }

        if let Some(capture) = &case.capture {
            let value = captured_value(capture, &response).map_err(CaseOutcome::CaptureMissing)?;
            debug!(variable = %capture.variable, value = %value, "captured");
            state
                .capture(&capture.variable, value)
                .map_err(|e| CaseOutcome::CaptureMissing(e.to_string()))?;
        }

        Ok(())
    }

    async fn send(&self, request: &RequestSpec) -> Result<ResponseSpec, CaseOutcome> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| CaseOutcome::Transport(e.to_string()))?;
        debug!(
            status = response.status,
            elapsed = ?response.duration,
            "response received"
        );
        Ok(response)
    }
}

/// Reads the value a capture points at, as a non-empty string.
fn captured_value(capture: &Capture, response: &ResponseSpec) -> Result<String, String> {
    let not_found = || format!("'{}' not found at {}", capture.variable, capture.path);

    let json = response.json().map_err(|e| {
        format!("'{}' not captured, body is not JSON: {e}", capture.variable)
    })?;
    let value = json_path::query(&json, &capture.path)
        .map_err(|e| e.to_string())?
        .ok_or_else(not_found)?;

    let text = match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => return Err(not_found()),
    };
    if text.trim().is_empty() {
        return Err(not_found());
    }
    Ok(text)
}
