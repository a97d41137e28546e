//! Restcheck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration and reporting.

pub mod adapters;
pub mod config;
pub mod report;
pub mod testing;

pub use adapters::ReqwestHttpClient;
pub use config::{ConfigError, SuiteConfig};
pub use report::{ReportFormat, render_json, render_text};
pub use testing::TestRunner;
