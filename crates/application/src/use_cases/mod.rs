//! Use cases (application services)

pub mod objects_suite;
mod run_suite;

pub use objects_suite::{OBJECT_ID, objects_suite};
pub use run_suite::RunSuite;
