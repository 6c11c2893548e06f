//! File loading for hira configuration.

use anyhow::{Context, Result};
use std::fs;

use super::types::{default_model, Config};

impl Config {
    /// Loads the global config from `~/.config/hira/config.toml`.
    ///
    /// If no config file exists, creates one with sensible defaults
    /// (including `{env:VAR}` placeholders for API keys) and returns it.
    pub(super) fn load_global() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            let default_toml = format!(
                r#"model = "{}"
default_provider = "ollama"
data_dir = "data"

[provider]

[provider.ollama]
api_key = "{{env:OLLAMA_API_KEY}}"
base_url = "{}"

[provider.anthropic]
api_key = "{{env:ANTHROPIC_API_KEY}}"

[provider.openai]
api_key = "{{env:OPENAI_API_KEY}}"

[provider.openrouter]
api_key = "{{env:OPENROUTER_API_KEY}}"

[agent]
max_iterations = {}
max_turn_seconds = {}
"#,
                default_model(),
                crate::constants::OLLAMA_DEFAULT_BASE_URL,
                crate::constants::MAX_ITERATIONS,
                crate::constants::MAX_TURN_SECONDS,
            );
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &default_toml)
                .with_context(|| format!("Failed to write default config to {:?}", path))?;
            let config: Config = toml::from_str(&default_toml)
                .with_context(|| "Failed to parse default config".to_string())?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;
        Ok(config)
    }
}
