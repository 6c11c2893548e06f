//! Struct definitions and serde defaults for hira configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for hira, deserialized from `config.toml`.
///
/// Fields use serde defaults so hira can run with sensible defaults
/// when no config file exists.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Default model identifier (e.g. `"gpt-oss:120b"`).
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Default provider name (e.g., "ollama", "anthropic").
    #[serde(default)]
    pub default_provider: Option<String>,
    /// Directory holding the backing CSV tables.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Sampling temperature for the generator.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Dispatch loop budgets.
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Returns the default model identifier.
///
/// Used by serde's `#[serde(default)]` attribute during deserialization.
pub(super) fn default_model() -> String {
    crate::constants::DEFAULT_MODEL.to_string()
}

/// Provider-specific configuration map.
///
/// Each field corresponds to a supported LLM provider. Only providers
/// the user has configured will be `Some`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProviderConfig {
    /// Configuration for the OpenAI API provider.
    pub openai: Option<ProviderEntry>,
    /// Configuration for the Anthropic API provider.
    pub anthropic: Option<ProviderEntry>,
    /// Configuration for the Ollama provider (local or hosted).
    pub ollama: Option<ProviderEntry>,
    /// Configuration for the OpenRouter API provider.
    pub openrouter: Option<ProviderEntry>,
}

/// Connection details for a single LLM provider.
///
/// Allows overriding the API key, endpoint URL, and model on a
/// per-provider basis.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderEntry {
    /// API key for authentication. Can also be set via environment variables.
    pub api_key: Option<String>,
    /// Custom base URL for the provider's API (useful for proxies or self-hosted instances).
    pub base_url: Option<String>,
    /// Model identifier to use with this provider, overriding the global default.
    pub model: Option<String>,
}

/// Budgets for one dispatch-loop turn.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct AgentConfig {
    /// Maximum reasoning iterations per turn.
    pub max_iterations: Option<usize>,
    /// Wall-clock deadline per turn, in seconds.
    pub max_turn_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            provider: ProviderConfig::default(),
            default_provider: None,
            data_dir: None,
            temperature: None,
            agent: AgentConfig::default(),
        }
    }
}
