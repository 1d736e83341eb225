//! Seedling CLI entrypoint for beginner-friendly pull request triage.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use seedling::{IntakeError, SeedlingConfig};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_FILTER_VARIABLE: &str = "SEEDLING_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), IntakeError> {
    let config = load_config()?;
    cli::analyse::run(&config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`IntakeError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<SeedlingConfig, IntakeError> {
    SeedlingConfig::load().map_err(|error| IntakeError::Configuration {
        message: error.to_string(),
    })
}

/// Installs a stderr `fmt` subscriber filtered by `SEEDLING_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_VARIABLE)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ignored = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}
