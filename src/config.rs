use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::ConfigError;
use crate::llm_handler::LLMProvider;
use crate::prompts::Feature;

pub const DEFAULT_CONFIG_FILE: &str = "pm_assistant.json";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CHECKOUT_URL: &str = "https://example.com/checkout";

/// Per-feature overrides for the system-role prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemPrompts {
    pub format: Option<String>,
    pub summarize: Option<String>,
    pub action_items: Option<String>,
    pub sentiment: Option<String>,
    pub email: Option<String>,
}

impl SystemPrompts {
    fn get(&self, feature: Feature) -> Option<&str> {
        match feature {
            Feature::Format => self.format.as_deref(),
            Feature::Summarize => self.summarize.as_deref(),
            Feature::ActionItems => self.action_items.as_deref(),
            Feature::Sentiment => self.sentiment.as_deref(),
            Feature::Email => self.email.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub llm_provider: LLMProvider,
    // Falls back to the provider's default model
    pub model: Option<String>,
    // Overrides the provider's chat endpoint
    pub api_url: Option<String>,
    // 0 disables the explicit timeout
    pub request_timeout_secs: u64,
    pub checkout_url: String,
    pub log_dir: Option<PathBuf>,
    pub system_prompts: SystemPrompts,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            llm_provider: LLMProvider::default(),
            model: None,
            api_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            checkout_url: DEFAULT_CHECKOUT_URL.to_string(),
            log_dir: None,
            system_prompts: SystemPrompts::default(),
        }
    }
}

impl AppConfig {
    /// Load the configuration from a JSON file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    pub fn system_prompt(&self, feature: Feature) -> &str {
        self.system_prompts
            .get(feature)
            .unwrap_or_else(|| feature.default_system_prompt())
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.llm_provider.default_model())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::DEFAULT_SENTIMENT_SYSTEM_PROMPT;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.model(), "gpt-4");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(config.checkout_url, "https://example.com/checkout");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"port": 8088, "llm_provider": "OpenRouter", "system_prompts": {{"format": "Be terse."}}}}"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.port, 8088);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.llm_provider, LLMProvider::OpenRouter);
        assert_eq!(config.system_prompt(Feature::Format), "Be terse.");
        assert_eq!(
            config.system_prompt(Feature::Sentiment),
            DEFAULT_SENTIMENT_SYSTEM_PROMPT
        );
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_model_follows_provider() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"llm_provider": "Anthropic"}}"#).unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.model(), "claude-sonnet-4-20250514");

        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"llm_provider": "OpenRouter"}}"#).unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.model(), "openai/gpt-4");
    }

    #[test]
    fn test_explicit_model_wins() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"llm_provider": "Anthropic", "model": "claude-3-5-haiku-latest"}}"#).unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.model(), "claude-3-5-haiku-latest");
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"request_timeout_secs": 0}}"#).unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.request_timeout(), None);
    }
}
