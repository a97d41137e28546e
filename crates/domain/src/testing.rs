//! Test cases, assertions and their results.
//!
//! A [`TestSuite`] is an ordered list of [`TestCase`]s. Each case sends one
//! request and checks a list of [`Assertion`]s against the response. Running
//! a suite yields a [`SuiteReport`] with one [`CaseReport`] per case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::request::{HttpMethod, RequestSpec};

/// A check to run against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Check response status code.
    StatusCode {
        /// Expected status code or range.
        expected: StatusExpectation,
    },
    /// Check a header is present with exactly this value.
    HeaderEquals {
        /// Header name (case-insensitive).
        name: String,
        /// Expected value.
        value: String,
    },
    /// Check a header is present.
    HeaderExists {
        /// Header name (case-insensitive).
        name: String,
    },
    /// Check header value matches pattern.
    HeaderMatches {
        /// Header name.
        name: String,
        /// Regex pattern to match.
        pattern: String,
    },
    /// Check the body contains the expected JSON, ignoring extra fields.
    ///
    /// String leaves may reference captured variables as `{{name}}`.
    JsonMatch {
        /// Expected (partial) JSON document.
        expected: serde_json::Value,
    },
    /// Check JSON path exists and optionally its value.
    JsonPath {
        /// Path expression (e.g., "$.data.price").
        path: String,
        /// Expected value (as JSON).
        expected: Option<serde_json::Value>,
    },
    /// Check the body validates against a JSON schema.
    JsonSchema {
        /// The schema document.
        schema: serde_json::Value,
    },
    /// Check body is valid JSON.
    IsJson,
}

impl Assertion {
    /// Exact status code check.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::StatusCode {
            expected: StatusExpectation::exact(code),
        }
    }

    /// Exact header value check.
    #[must_use]
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::HeaderEquals {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Partial JSON match check.
    #[must_use]
    pub const fn json_match(expected: serde_json::Value) -> Self {
        Self::JsonMatch { expected }
    }

    /// JSON schema check.
    #[must_use]
    pub const fn json_schema(schema: serde_json::Value) -> Self {
        Self::JsonSchema { schema }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code {}", expected.description()),
            Self::HeaderEquals { name, value } => format!("Header '{name}' equals '{value}'"),
            Self::HeaderExists { name } => format!("Header '{name}' exists"),
            Self::HeaderMatches { name, pattern } => {
                format!("Header '{name}' matches /{pattern}/")
            }
            Self::JsonMatch { expected } => format!("JSON matches {expected}"),
            Self::JsonPath {
                path,
                expected: Some(v),
            } => format!("JSON {path} equals {v}"),
            Self::JsonPath {
                path,
                expected: None,
            } => format!("JSON {path} exists"),
            Self::JsonSchema { .. } => "Body conforms to JSON schema".to_string(),
            Self::IsJson => "Body is valid JSON".to_string(),
        }
    }
}

/// Expected status code value or range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => (*min..=*max).contains(&status),
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Get description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes_str.join(", "))
            }
        }
    }

    /// Create a "success" expectation (200-299).
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }

    /// Create an exact status expectation.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

/// Copies a value out of a passing response into the run state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Capture {
    /// Variable name later cases reference as `{{variable}}`.
    pub variable: String,
    /// Path of the value in the response body (e.g., "$.id").
    pub path: String,
}

/// One named request plus the expectations on its response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    /// Case name, shown in reports.
    pub name: String,
    /// Free-form note about the case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// The request to send.
    pub request: RequestSpec,
    /// Checks to run against the response.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    /// Value to capture after all checks pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<Capture>,
}

impl TestCase {
    /// Creates a case with no expectations.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestSpec) -> Self {
        Self {
            name: name.into(),
            note: None,
            request,
            assertions: Vec::new(),
            capture: None,
        }
    }

    /// Adds an assertion (builder pattern).
    #[must_use]
    pub fn expect(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Adds an exact status assertion (builder pattern).
    #[must_use]
    pub fn expect_status(self, code: u16) -> Self {
        self.expect(Assertion::status(code))
    }

    /// Captures `path` from the response body into `variable`.
    #[must_use]
    pub fn capture(mut self, variable: impl Into<String>, path: impl Into<String>) -> Self {
        self.capture = Some(Capture {
            variable: variable.into(),
            path: path.into(),
        });
        self
    }

    /// Attaches a note (builder pattern).
    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// An ordered list of test cases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestSuite {
    /// Unique identifier.
    #[serde(default = "generate_id")]
    pub id: Uuid,
    /// Test suite name.
    pub name: String,
    /// Cases, executed in order.
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

fn generate_id() -> Uuid {
    Uuid::now_v7()
}

impl TestSuite {
    /// Create a new empty test suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Add a case (builder pattern).
    #[must_use]
    pub fn with_case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Looks up a case by name.
    #[must_use]
    pub fn case(&self, name: &str) -> Option<&TestCase> {
        self.cases.iter().find(|c| c.name == name)
    }

    /// Check if the suite is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Get the number of cases.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cases.len()
    }
}

/// How a case ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// Every expectation held.
    Passed,
    /// One or more assertions failed.
    AssertionsFailed(usize),
    /// A template referenced state that was never captured; nothing was sent.
    UndefinedState(String),
    /// The request could not be completed.
    Transport(String),
    /// The response passed but the declared capture was missing.
    CaptureMissing(String),
}

impl CaseOutcome {
    /// Returns true for [`CaseOutcome::Passed`].
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Short explanation of a failure.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Passed => "passed".to_string(),
            Self::AssertionsFailed(1) => "1 assertion failed".to_string(),
            Self::AssertionsFailed(n) => format!("{n} assertions failed"),
            Self::UndefinedState(reason) => format!("undefined state: {reason}"),
            Self::Transport(reason) => format!("request failed: {reason}"),
            Self::CaptureMissing(reason) => format!("capture failed: {reason}"),
        }
    }
}

/// Result of running one case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseReport {
    /// Case name.
    pub name: String,
    /// Method that was (or would have been) sent.
    pub method: HttpMethod,
    /// URL after variable resolution, or the template if resolution failed.
    pub url: String,
    /// How the case ended.
    pub outcome: CaseOutcome,
    /// Individual assertion results; empty when no response was received.
    #[serde(default)]
    pub assertions: Vec<AssertionResult>,
    /// Status received, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Wall time of the case in milliseconds.
    pub duration_ms: u64,
}

impl CaseReport {
    /// Returns true if the case passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.outcome.is_passed()
    }

    /// The failing assertion results.
    pub fn failed_assertions(&self) -> impl Iterator<Item = &AssertionResult> {
        self.assertions.iter().filter(|r| !r.passed)
    }
}

/// Results from running a test suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Identifier of this run.
    pub run_id: Uuid,
    /// Test suite that was run.
    pub suite_name: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Per-case results, in execution order.
    pub cases: Vec<CaseReport>,
    /// Total number of cases executed.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Create a report from per-case results.
    #[must_use]
    pub fn new(
        suite_name: impl Into<String>,
        started_at: DateTime<Utc>,
        cases: Vec<CaseReport>,
        duration_ms: u64,
    ) -> Self {
        let total = cases.len();
        let passed = cases.iter().filter(|c| c.passed()).count();

        Self {
            run_id: Uuid::now_v7(),
            suite_name: suite_name.into(),
            started_at,
            cases,
            total,
            passed,
            failed: total - passed,
            duration_ms,
        }
    }

    /// Check if all cases passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Looks up a case result by name.
    #[must_use]
    pub fn case(&self, name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|c| c.name == name)
    }

    /// The failing cases.
    pub fn failures(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases.iter().filter(|c| !c.passed())
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}
