use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use soundcue_core::{StreamUrl, Taxonomy};

use crate::error::{ApiError, ApiResult};

/// Where catalog records come from. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The sample catalog compiled into soundcue.
    #[default]
    Seed,
    /// The catalog backend at `api_url`.
    Remote,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Seed => "seed",
            Self::Remote => "remote",
        })
    }
}

impl FromStr for SourceKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seed" => Ok(Self::Seed),
            "remote" => Ok(Self::Remote),
            other => Err(ApiError::Config(format!(
                "unknown source {other:?} (expected \"seed\" or \"remote\")"
            ))),
        }
    }
}

/// Configuration for soundcue.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SOUNDCUE_* prefix)
/// 3. Config file (~/.config/soundcue/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the catalog backend.
    ///
    /// Can be set via:
    /// - CLI: --api-url http://host:8000
    /// - ENV: SOUNDCUE_API_URL
    /// - Config: api_url = "..."
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Record source: "seed" or "remote".
    #[serde(default)]
    pub source: SourceKind,

    /// Stream address template; `{id}` is replaced by the record id.
    #[serde(default = "default_stream_url_template")]
    pub stream_url_template: String,

    /// Optional TOML file replacing the shipped genre/context tables.
    #[serde(default)]
    pub taxonomy_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            source: SourceKind::default(),
            stream_url_template: default_stream_url_template(),
            taxonomy_path: None,
        }
    }
}

impl Config {
    /// Load configuration from the default config file and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `config_path` (if it exists) and environment
    /// variables with the SOUNDCUE_ prefix.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("soundcue");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;
        log::debug!(
            "configuration loaded: source={}, api_url={}",
            config.source,
            config.api_url
        );
        Ok(config)
    }

    /// The stream URL template, validated.
    pub fn stream_url(&self) -> ApiResult<StreamUrl> {
        Ok(StreamUrl::new(self.stream_url_template.clone())?)
    }

    /// The taxonomy to run with: the override file if one is configured,
    /// otherwise the shipped tables.
    ///
    /// # Errors
    ///
    /// A configured file that cannot be read or fails validation is an
    /// error; there is no silent fallback to the shipped tables.
    pub fn taxonomy(&self) -> ApiResult<Cow<'static, Taxonomy>> {
        match &self.taxonomy_path {
            Some(path) => {
                log::info!("using taxonomy tables from {}", path.display());
                Ok(Cow::Owned(Taxonomy::load(path)?))
            }
            None => Ok(Cow::Borrowed(Taxonomy::builtin())),
        }
    }
}

fn default_api_url() -> String {
    String::from("http://localhost:8000")
}

fn default_stream_url_template() -> String {
    StreamUrl::DEFAULT_TEMPLATE.to_string()
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/soundcue/config.toml
/// - macOS: ~/Library/Application Support/soundcue/config.toml
/// - Windows: %APPDATA%\soundcue\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("soundcue")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Soundcue Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SOUNDCUE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Where catalog records come from:
# - "seed":   the sample catalog bundled with soundcue
# - "remote": the catalog backend at api_url
#
# Can also be set via:
# - CLI: soundcue --source remote all
# - Environment: SOUNDCUE_SOURCE=remote
source = "seed"

# Base URL of the catalog backend
api_url = "http://localhost:8000"

# Stream address handed to players; {id} is replaced by the record id
stream_url_template = "/api/stream/{id}"

# Optional replacement for the built-in genre/context tables.
# Run 'soundcue taxonomy dump' for a starting point.
#taxonomy_path = "/path/to/taxonomy.toml"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}

/// Create the example config at `config_path` unless something is there.
pub fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
