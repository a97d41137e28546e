//! Restcheck Domain - Core types
//!
//! This crate defines the domain model for the objects API suite:
//! requests, responses, assertions, test cases and the run state shared
//! between them. All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod json_path;
pub mod objects;
pub mod request;
pub mod response;
pub mod run_state;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use objects::{DeletionNotice, NewObject};
pub use run_state::RunState;
pub use testing::{
    Assertion, AssertionResult, CaseOutcome, CaseReport, Capture, StatusExpectation,
    SuiteReport, TestCase, TestSuite,
};
