//! Loads `~/.content-studio/config.toml`.
//!
//! ```toml
//! timeout_secs = 60
//!
//! [providers.perplexity]
//! base_url = "https://api.perplexity.ai"
//! model = "sonar"
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::catalog::Provider;

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Config {
    #[serde(default)]
    providers: HashMap<String, ProviderConfig>,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ProviderConfig {
    base_url: Option<String>,
    model: Option<String>,
}

/// Reads the config file, returning defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read config.toml: {}", e))?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config, String> {
    let config: Config =
        toml::from_str(content).map_err(|e| format!("Failed to parse config.toml: {}", e))?;
    for name in config.providers.keys() {
        name.parse::<Provider>()
            .map_err(|e| format!("Invalid provider in config.toml: {}", e))?;
    }
    Ok(config)
}

impl Config {
    fn provider(&self, provider: Provider) -> Option<&ProviderConfig> {
        self.providers.get(provider.id())
    }

    /// Base URL that `/chat/completions` is appended to.
    pub fn base_url(&self, provider: Provider) -> String {
        self.provider(provider)
            .and_then(|p| p.base_url.as_deref())
            .unwrap_or(provider.default_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    /// Model to propose when connecting a key without an explicit choice.
    pub fn preferred_model(&self, provider: Provider) -> String {
        self.provider(provider)
            .and_then(|p| p.model.clone())
            .unwrap_or_else(|| provider.default_model().id.to_string())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Points a provider at a different base URL.
    pub fn with_base_url(mut self, provider: Provider, url: impl Into<String>) -> Self {
        self.providers
            .entry(provider.id().to_string())
            .or_default()
            .base_url = Some(url.into());
        self
    }
}
