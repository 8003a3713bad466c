//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use postsmith_core::{AspectRatio, ImageSize, PostBrief};
use postsmith_error::{ConfigError, PostsmithResult};
use std::path::PathBuf;
use uuid::Uuid;

/// Postsmith - social media posts and matching images from a short brief
#[derive(Parser, Debug)]
#[command(name = "postsmith")]
#[command(about = "Generate social media posts and matching images from a short brief", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// User whose history is read and written
    #[arg(long, global = true, env = "POSTSMITH_USER", default_value = "local")]
    pub user: String,

    /// Configuration file to use instead of the layered defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// History file to use instead of the configured one
    #[arg(long, global = true)]
    pub history: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a post from a brief
    Generate {
        #[command(flatten)]
        brief: BriefArgs,

        /// Also generate an image from the post's visual prompt
        #[arg(long)]
        image: bool,

        /// Image aspect ratio (1:1, 3:4, 9:16, 4:3, 16:9)
        #[arg(long, default_value = "1:1")]
        aspect: AspectRatio,

        /// Image resolution (1K, 2K, 4K); 2K and 4K use the pro image model
        #[arg(long, default_value = "1K")]
        size: ImageSize,

        /// Where to write the image
        #[arg(long)]
        out: Option<PathBuf>,

        /// Save the post to the history
        #[arg(long)]
        save: bool,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Generate a standalone image from a prompt
    Image {
        /// What the image should show
        #[arg(long)]
        prompt: String,

        /// Image aspect ratio (1:1, 3:4, 9:16, 4:3, 16:9)
        #[arg(long, default_value = "1:1")]
        aspect: AspectRatio,

        /// Image resolution (1K, 2K, 4K)
        #[arg(long, default_value = "1K")]
        size: ImageSize,

        /// Where to write the image
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Saved post history
    #[command(subcommand)]
    History(HistoryCommands),
}

/// The post brief, as flags.
#[derive(Args, Debug, Clone)]
pub struct BriefArgs {
    /// What the post is about
    #[arg(long)]
    pub theme: String,

    /// Market niche (e.g., "Coffee")
    #[arg(long, default_value = "General")]
    pub niche: String,

    /// Who the post is for
    #[arg(long, default_value = "General audience")]
    pub audience: String,

    /// What the post should achieve
    #[arg(long, default_value = "Engagement")]
    pub goal: String,

    /// Voice of the post
    #[arg(long, default_value = "Friendly")]
    pub tone: String,
}

impl BriefArgs {
    /// Build the brief sent to the text model.
    pub fn to_brief(&self) -> PostsmithResult<PostBrief> {
        PostBrief::builder()
            .theme(self.theme.as_str())
            .niche(self.niche.as_str())
            .audience(self.audience.as_str())
            .goal(self.goal.as_str())
            .tone(self.tone.as_str())
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid brief: {}", e)).into())
    }
}

/// History subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List saved posts, newest first
    List {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Show one saved post
    Show {
        /// Saved post id
        id: Uuid,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Edit the text of a saved post
    Edit {
        /// Saved post id
        id: Uuid,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New caption
        #[arg(long)]
        caption: Option<String>,
    },

    /// Delete a saved post
    Delete {
        /// Saved post id
        id: Uuid,
    },
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// Pretty-printed JSON
    Json,
}
