//! Test runner implementation.
//!
//! Evaluates assertions against HTTP responses and produces assertion results.

use regex::Regex;
use restcheck_application::ports::ResponseVerifier;
use restcheck_domain::response::ResponseSpec;
use restcheck_domain::{Assertion, AssertionResult, StatusExpectation, json_path};
use serde_json::Value;

use super::json_match::match_json;

/// Test runner that evaluates assertions against responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestRunner;

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => check_status_code(assertion, response, expected),
            Assertion::HeaderEquals { name, value } => {
                check_header(assertion, response, name, Some(value))
            }
            Assertion::HeaderExists { name } => check_header(assertion, response, name, None),
            Assertion::HeaderMatches { name, pattern } => {
                check_header_matches(assertion, response, name, pattern)
            }
            Assertion::JsonMatch { expected } => check_json_match(assertion, response, expected),
            Assertion::JsonPath { path, expected } => {
                check_json_path(assertion, response, path, expected.as_ref())
            }
            Assertion::JsonSchema { schema } => check_json_schema(assertion, response, schema),
            Assertion::IsJson => match response.json() {
                Ok(_) => AssertionResult::pass(assertion.clone()),
                Err(e) => AssertionResult::fail_with_value(
                    assertion.clone(),
                    response.body_preview(),
                    format!("Body is not valid JSON: {e}"),
                ),
            },
        }
    }
}

impl ResponseVerifier for TestRunner {
    fn verify(&self, assertions: &[Assertion], response: &ResponseSpec) -> Vec<AssertionResult> {
        assertions
            .iter()
            .map(|assertion| self.run_assertion(assertion, response))
            .collect()
    }
}

fn check_status_code(
    assertion: &Assertion,
    response: &ResponseSpec,
    expected: &StatusExpectation,
) -> AssertionResult {
    let actual = response.status;
    if expected.matches(actual) {
        AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            actual.to_string(),
            format!(
                "Expected status {}, got {} (body: {})",
                expected.description(),
                response.status_code(),
                response.body_preview()
            ),
        )
    }
}

fn check_header(
    assertion: &Assertion,
    response: &ResponseSpec,
    name: &str,
    expected_value: Option<&String>,
) -> AssertionResult {
    let Some(actual_value) = response.get_header(name) else {
        return AssertionResult::fail(assertion.clone(), format!("Header '{name}' not found"));
    };

    match expected_value {
        Some(expected) if actual_value != expected => AssertionResult::fail_with_value(
            assertion.clone(),
            actual_value.clone(),
            format!("Header '{name}' value mismatch: expected '{expected}', got '{actual_value}'"),
        ),
        _ => AssertionResult::pass_with_value(assertion.clone(), actual_value.clone()),
    }
}

fn check_header_matches(
    assertion: &Assertion,
    response: &ResponseSpec,
    name: &str,
    pattern: &str,
) -> AssertionResult {
    let Some(actual_value) = response.get_header(name) else {
        return AssertionResult::fail(assertion.clone(), format!("Header '{name}' not found"));
    };

    match Regex::new(pattern) {
        Ok(regex) if regex.is_match(actual_value) => {
            AssertionResult::pass_with_value(assertion.clone(), actual_value.clone())
        }
        Ok(_) => AssertionResult::fail_with_value(
            assertion.clone(),
            actual_value.clone(),
            format!("Header '{name}' value '{actual_value}' does not match pattern '{pattern}'"),
        ),
        Err(e) => AssertionResult::fail(
            assertion.clone(),
            format!("Invalid regex pattern '{pattern}': {e}"),
        ),
    }
}

/// Parses the body, turning a parse failure into a failed result.
fn parse_body(assertion: &Assertion, response: &ResponseSpec) -> Result<Value, AssertionResult> {
    response.json().map_err(|e| {
        AssertionResult::fail_with_value(
            assertion.clone(),
            response.body_preview(),
            format!("Failed to parse body as JSON: {e}"),
        )
    })
}

fn check_json_match(
    assertion: &Assertion,
    response: &ResponseSpec,
    expected: &Value,
) -> AssertionResult {
    let json = match parse_body(assertion, response) {
        Ok(json) => json,
        Err(failed) => return failed,
    };

    match match_json(expected, &json) {
        Ok(()) => AssertionResult::pass(assertion.clone()),
        Err(mismatch) => AssertionResult::fail_with_value(
            assertion.clone(),
            mismatch.actual.clone().unwrap_or_else(|| "<missing>".to_string()),
            mismatch.to_string(),
        ),
    }
}

fn check_json_path(
    assertion: &Assertion,
    response: &ResponseSpec,
    path: &str,
    expected: Option<&Value>,
) -> AssertionResult {
    let json = match parse_body(assertion, response) {
        Ok(json) => json,
        Err(failed) => return failed,
    };

    match json_path::query(&json, path) {
        Ok(Some(value)) => match expected {
            Some(expected_value) if &value != expected_value => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!("JSON path '{path}' value mismatch: expected {expected_value}, got {value}"),
            ),
            _ => AssertionResult::pass_with_value(assertion.clone(), value.to_string()),
        },
        Ok(None) => {
            AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found"))
        }
        Err(e) => AssertionResult::fail(assertion.clone(), format!("Invalid JSON path '{path}': {e}")),
    }
}

fn check_json_schema(
    assertion: &Assertion,
    response: &ResponseSpec,
    schema: &Value,
) -> AssertionResult {
    let validator = match jsonschema::validator_for(schema) {
        Ok(validator) => validator,
        Err(e) => {
            return AssertionResult::fail(assertion.clone(), format!("Invalid JSON schema: {e}"));
        }
    };
    let json = match parse_body(assertion, response) {
        Ok(json) => json,
        Err(failed) => return failed,
    };

    let errors: Vec<String> = validator.iter_errors(&json).map(|e| e.to_string()).collect();
    if errors.is_empty() {
        AssertionResult::pass(assertion.clone())
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            json.to_string(),
            format!("Body violates JSON schema: {}", errors.join("; ")),
        )
    }
}
