//! Restcheck Application - Use cases and ports
//!
//! This crate holds the objects-suite catalog and the sequential runner.
//! It talks to the outside world only through the traits in [`ports`].

pub mod error;
pub mod ports;
pub mod use_cases;
pub mod variable_resolver;

pub use error::{ApplicationError, ApplicationResult};
