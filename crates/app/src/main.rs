//! Restcheck - objects API integration suite
//!
//! Runs the objects suite once against the configured endpoint, prints the
//! report and exits non-zero when any case failed.

use std::process::ExitCode;

use restcheck_application::use_cases::{RunSuite, objects_suite};
use restcheck_infrastructure::{ReqwestHttpClient, SuiteConfig, TestRunner};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match SuiteConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(2);
        }
    };

    match run(&config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(2)
        }
    }
}

/// Runs the suite and reports whether every case passed.
async fn run(config: &SuiteConfig) -> Result<bool, Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting restcheck v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.base_url
    );

    let client = ReqwestHttpClient::new(&config.user_agent, config.timeout_ms)?;
    let suite = objects_suite(&config.base_url)?;
    let report = RunSuite::new(client, TestRunner::new())
        .with_stop_on_failure(config.stop_on_failure)
        .execute(&suite)
        .await;

    let rendered = config.report_format.render(&report)?;
    println!("{}", rendered.trim_end());
    Ok(report.all_passed())
}
