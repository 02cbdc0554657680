//! Configuration file support.
//!
//! A config file supplies defaults for the CLI. It is optional: with no file
//! present every setting falls back to its built-in default.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyze::{Language, Quality};

/// Config file names searched for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["decode.yaml", ".decode.yaml"];

/// Output formats the report module can write.
pub const FORMATS: &[&str] = &["pretty", "json", "sarif"];

/// Commented starter config written by `decode init`.
pub const TEMPLATE: &str = include_str!("templates/decode.yaml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Fallback language tag.
    #[serde(default)]
    pub language: Option<String>,
    /// "pretty" (default), "json", or "sarif"
    #[serde(default)]
    pub format: Option<String>,
    /// Quality level below which `analyze` exits non-zero.
    #[serde(default)]
    pub fail_on: Option<String>,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a config from YAML text. An empty document is the default config.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load the config at `path`, or the first discovered one, or defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => discover(Path::new(".")),
        };

        match path {
            Some(p) => {
                let config = Self::parse_file(&p)
                    .map_err(|e| anyhow::anyhow!("parsing config {}: {}", p.display(), e))?;
                validate(&config)?;
                tracing::debug!(path = %p.display(), "loaded config");
                Ok((config, Some(p)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// The configured fallback language, if any.
    pub fn default_language(&self) -> anyhow::Result<Option<Language>> {
        self.language
            .as_deref()
            .map(|l| l.parse::<Language>().map_err(anyhow::Error::msg))
            .transpose()
    }

    /// Returns the output format (defaults to "pretty").
    pub fn get_format(&self) -> &str {
        self.format.as_deref().unwrap_or("pretty")
    }

    /// The configured failure threshold, if any.
    pub fn fail_on(&self) -> anyhow::Result<Option<Quality>> {
        self.fail_on
            .as_deref()
            .map(|q| q.parse::<Quality>().map_err(anyhow::Error::msg))
            .transpose()
    }
}

/// Settings for the hosted chat-completion collaborator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the bearer token
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout in milliseconds (default: 60000)
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_endpoint() -> String {
    "https://api.together.xyz/v1".to_string()
}

fn default_model() -> String {
    "meta-llama/Llama-3.3-70B-Instruct-Turbo".to_string()
}

fn default_api_key_env() -> String {
    "DECODE_API_KEY".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout() -> u64 {
    60_000
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_ms: default_timeout(),
        }
    }
}

/// Find a config file in `dir`, then in the user config directory.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
        .or_else(|| user_config_path().filter(|p| p.is_file()))
}

/// Per-user config location, e.g. `~/.config/decode/decode.yaml`.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "decode").map(|dirs| dirs.config_dir().join("decode.yaml"))
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    config.default_language()?;
    config.fail_on()?;

    if let Some(format) = &config.format {
        if !FORMATS.contains(&format.as_str()) {
            anyhow::bail!(
                "invalid format {:?}, must be one of: {}",
                format,
                FORMATS.join(", ")
            );
        }
    }

    let assistant = &config.assistant;
    if assistant.endpoint.trim().is_empty() {
        anyhow::bail!("assistant.endpoint must not be empty");
    }
    if assistant.model.trim().is_empty() {
        anyhow::bail!("assistant.model must not be empty");
    }
    if assistant.max_tokens == 0 {
        anyhow::bail!("assistant.max_tokens must be greater than zero");
    }
    if !(0.0..=2.0).contains(&assistant.temperature) {
        anyhow::bail!(
            "assistant.temperature {} out of range, must be between 0 and 2",
            assistant.temperature
        );
    }

    Ok(())
}
