//! Postsmith CLI binary.
//!
//! - Generate a post (and optionally an image) from a brief
//! - Generate a standalone image from a prompt
//! - List, show, edit and delete saved posts

use clap::Parser;
use postsmith::cli::{Cli, describe_error, run};
use postsmith::observability::{ObservabilityConfig, init_observability};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is normal
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    if let Err(e) = init_observability(&observability) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            eprintln!("Error: {}", describe_error(&err));
            ExitCode::FAILURE
        }
    }
}
