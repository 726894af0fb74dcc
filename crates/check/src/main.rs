//! `datefence-check` -- applies the outside date rule to JSON-lines records.
//!
//! Prints one JSON report per record on stdout; logs go to stderr.
//!
//! # Environment variables
//!
//! | Variable     | Required | Default | Description                              |
//! |--------------|----------|---------|------------------------------------------|
//! | `RULE_FILE`  | yes      | --      | JSON file with `field`, `params`, `language` |
//! | `INPUT_FILE` | no       | stdin   | JSON-lines records to check              |
//! | `FAIL_FAST`  | no       | `false` | Stop at the first invalid record         |
//!
//! Exit status is `0` when every record passes, `1` when any record is
//! invalid or malformed, and `2` on configuration or I/O errors.

use std::process::ExitCode;

use datefence_check::config::CheckConfig;
use datefence_check::runner;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datefence_check=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match CheckConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Invalid configuration");
            return ExitCode::from(2);
        }
    };

    tracing::info!(
        rule_file = %config.rule_file.display(),
        input = %config
            .input_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdin".into()),
        fail_fast = config.fail_fast,
        "Starting datefence-check",
    );

    match runner::run_with_config(&config) {
        Ok(summary) => {
            tracing::info!(
                checked = summary.checked,
                invalid = summary.invalid,
                malformed = summary.malformed,
                "Check complete",
            );
            if summary.all_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Check failed");
            ExitCode::from(2)
        }
    }
}
