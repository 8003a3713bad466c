//! Configuration for retries, models, the API endpoint and the history store.
//!
//! Sources, in increasing precedence:
//! - Bundled defaults (`include_str!` of the workspace `postsmith.toml`)
//! - `~/.config/postsmith/postsmith.toml`
//! - `./postsmith.toml`

use config::{Config, File, FileFormat};
use postsmith_error::{ConfigError, PostsmithError, PostsmithResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../postsmith.toml");

/// Retry budget and backoff base.
///
/// ```toml
/// [retry]
/// max_attempts = 3
/// base_delay_ms = 2000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Network-call budget for rate-limited requests
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first un-hinted retry, in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    2000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

/// Backend model ids for each capability and tier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelCatalog {
    /// Structured text model
    pub text: String,
    /// Standard-tier image model
    pub image_standard: String,
    /// High-resolution image model
    pub image_pro: String,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            text: "gemini-2.5-flash".to_string(),
            image_standard: "gemini-2.5-flash-image".to_string(),
            image_pro: "gemini-3-pro-image-preview".to_string(),
        }
    }
}

/// Generative-AI endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the generative language API
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

/// History store settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Path of the JSON history file; a per-user data directory if unset
    #[serde(default)]
    pub history_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolved history file location.
    pub fn resolved_history_path(&self) -> PathBuf {
        self.history_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("postsmith")
                .join("history.json")
        })
    }
}

/// Top-level Postsmith configuration.
///
/// # Example
///
/// ```no_run
/// use postsmith_retry::PostsmithConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PostsmithConfig::load()?;
/// println!("Retrying up to {} times", config.retry.max_attempts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct PostsmithConfig {
    /// Retry settings
    #[serde(default)]
    pub retry: RetryConfig,
    /// Model ids per tier
    #[serde(default)]
    pub models: ModelCatalog,
    /// Endpoint settings
    #[serde(default)]
    pub api: ApiConfig,
    /// History store settings
    #[serde(default)]
    pub storage: StorageConfig,
}

impl PostsmithConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> PostsmithResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                PostsmithError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                PostsmithError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if absent.
    #[instrument]
    pub fn load() -> PostsmithResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let home_config = config_dir.join("postsmith").join("postsmith.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("postsmith").required(false));

        let config: Self = builder
            .build()
            .map_err(|e| {
                PostsmithError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                PostsmithError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string layered over the bundled defaults.
    pub fn from_toml_str(toml: &str) -> PostsmithResult<Self> {
        let config: Self = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| {
                PostsmithError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the generation client cannot run with.
    pub fn validate(&self) -> PostsmithResult<()> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::new("retry.max_attempts must be at least 1").into());
        }
        for (key, model) in [
            ("models.text", &self.models.text),
            ("models.image_standard", &self.models.image_standard),
            ("models.image_pro", &self.models.image_pro),
        ] {
            if model.trim().is_empty() {
                return Err(ConfigError::new(format!("{} must not be empty", key)).into());
            }
        }
        Ok(())
    }
}
