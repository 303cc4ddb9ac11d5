use std::path::Path;

use anyhow::{bail, Result};
use serde::Deserialize;

/// Credentials shipped in sample configs; treated as "no credential".
const PLACEHOLDER_KEYS: &[&str] = &["test-key", "your-api-key-here"];

/// Environment variable consulted when the config file carries no API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Root configuration structure, deserialized from `.sentiscan/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sentiment: SentimentConfig,
    #[serde(default)]
    pub verifier: VerifierConfig,
}

/// Settings for the hybrid sentiment orchestrator.
#[derive(Debug, Deserialize)]
pub struct SentimentConfig {
    /// Primary confidence at or above which the verifier is not consulted.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

/// Connection settings for the LLM verifier (any OpenAI-compatible endpoint).
#[derive(Debug, Clone, Deserialize)]
pub struct VerifierConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Falls back to `$OPENAI_API_KEY` via [`VerifierConfig::fill_credential_from_env`].
    #[serde(default)]
    pub api_key: Option<String>,
    /// Whole-request timeout; the verifier is never retried.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            model: default_model(),
            api_url: default_api_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_confidence_threshold() -> f64 {
    0.7
}

fn default_enabled() -> bool {
    true
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_api_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl VerifierConfig {
    /// The usable API key, if any. Empty and placeholder keys count as absent.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && !PLACEHOLDER_KEYS.contains(k))
    }

    /// Take the key from the environment when the file did not set one.
    pub fn fill_credential_from_env(&mut self) {
        if self.api_key.is_none() {
            self.api_key = std::env::var(API_KEY_ENV).ok();
        }
    }
}

impl Config {
    /// Reject values that would make every call misbehave.
    ///
    /// A missing credential or model is not an error: it disables escalation.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.sentiment.confidence_threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            bail!("sentiment.confidence_threshold must be within [0, 1], got {threshold}");
        }
        if self.verifier.timeout_secs == 0 {
            bail!("verifier.timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<search_dir>/.sentiscan/config.toml`
/// 3. `~/.config/sentiscan/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(search_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let local_config = search_dir.join(".sentiscan").join("config.toml");
    if local_config.exists() {
        let content = std::fs::read_to_string(&local_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("sentiscan").join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}
