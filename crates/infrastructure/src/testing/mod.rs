//! Response testing infrastructure.
//!
//! This module provides the test runner that evaluates assertions against HTTP responses.

mod json_match;
mod runner;

pub use json_match::{JsonMismatch, match_json};
pub use runner::TestRunner;
