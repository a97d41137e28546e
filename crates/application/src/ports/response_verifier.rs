//! Response verification port

use restcheck_domain::{Assertion, AssertionResult, response::ResponseSpec};

/// Port for checking assertions against a received response.
///
/// Implementations evaluate every assertion, in order, and return one
/// result per assertion.
pub trait ResponseVerifier: Send + Sync {
    /// Runs `assertions` against `response`.
    fn verify(&self, assertions: &[Assertion], response: &ResponseSpec) -> Vec<AssertionResult>;
}
