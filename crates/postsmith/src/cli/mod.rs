//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the postsmith binary.

mod commands;
mod generate;
mod history;
mod render;

pub use commands::{BriefArgs, Cli, Commands, HistoryCommands, OutputFormat};
pub use generate::{generate_image, generate_post};
pub use history::handle_history_command;
pub use render::{render_post, render_saved};

use postsmith_error::{PostsmithError, PostsmithErrorKind, PostsmithResult};
use postsmith_models::{GeminiBackend, GenerationClient};
use postsmith_retry::PostsmithConfig;
use postsmith_storage::{FilePostRepository, PostRepository};
use std::io::Write;

/// Run a parsed command line to completion.
pub async fn run(cli: Cli) -> PostsmithResult<()> {
    let config = match &cli.config {
        Some(path) => PostsmithConfig::from_file(path)?,
        None => PostsmithConfig::load()?,
    };
    let history_path = cli
        .history
        .clone()
        .unwrap_or_else(|| config.storage.resolved_history_path());
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Generate {
            brief,
            image,
            aspect,
            size,
            out,
            save,
            format,
        } => {
            let client = GenerationClient::new(GeminiBackend::from_env(&config.api)?, &config);
            let repo = if save {
                Some(FilePostRepository::new(&history_path)?)
            } else {
                None
            };
            let image_request = image.then_some((aspect, size, out));
            let post = generate_post(
                &client,
                repo.as_ref().map(|r| r as &dyn PostRepository),
                &cli.user,
                &brief,
                image_request,
                &mut std::io::stderr(),
            )
            .await?;
            render_post(&post, format, &mut stdout)?;
        }

        Commands::Image {
            prompt,
            aspect,
            size,
            out,
        } => {
            let client = GenerationClient::new(GeminiBackend::from_env(&config.api)?, &config);
            let path = generate_image(&client, &prompt, aspect, size, out).await?;
            writeln!(stdout, "{}", path.display())
                .map_err(|e| postsmith_error::OutputError::new("stdout", e.to_string()))?;
        }

        Commands::History(cmd) => {
            let repo = FilePostRepository::new(&history_path)?;
            handle_history_command(cmd, &repo, &cli.user, &mut stdout).await?;
        }
    }

    Ok(())
}

/// Message shown to the user when a command fails.
///
/// Generation failures get the friendlier per-kind wording; everything else
/// shows the underlying error without location details.
pub fn describe_error(err: &PostsmithError) -> String {
    match err.kind() {
        PostsmithErrorKind::Generation(e) => e.user_message(),
        PostsmithErrorKind::Remote(e) => e.to_string(),
        PostsmithErrorKind::Config(e) => match &e.key {
            Some(key) => format!("{} ({})", e.message, key),
            None => e.message.clone(),
        },
        PostsmithErrorKind::Storage(e) => e.kind.to_string(),
        PostsmithErrorKind::Output(e) => format!("could not write {}: {}", e.target, e.message),
    }
}
