//! LLM provider client and completion implementation.
//!
//! Contains the [`Provider`] struct which wraps rig-core provider clients
//! behind enum dispatch, keeping provider-specific details out of the
//! dispatch loop. Supports Anthropic, OpenAI, OpenRouter, and Ollama.
//!
//! The interface is deliberately non-streaming: the dispatch loop needs one
//! whole completion per THINKING step before it can parse a directive.

use anyhow::{Context, Result};
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::{anthropic, openai, openrouter};
use std::time::Duration;

use super::kind::ProviderKind;
use super::resolve::ModelSelection;
use crate::agent::Generator;
use crate::config::Config;

/// Internal enum wrapping provider-specific clients.
enum ClientKind {
    Anthropic(anthropic::Client),
    OpenAI(openai::Client),
    OpenRouter(openrouter::Client),
    Ollama(openai::Client),
}

/// A configured LLM provider ready to handle completion requests.
///
/// Wraps a rig-core provider client, the target model name, and the sampling
/// temperature. Agents are constructed on each call since they are cheap to
/// create.
pub struct Provider {
    client: ClientKind,
    model: String,
    temperature: f64,
}

/// Helper macro to reduce duplication across provider match arms.
///
/// Builds an agent from the given client, model, and temperature, then
/// executes the provided block with the agent bound to `$agent`.
macro_rules! with_agent {
    ($client:expr, $model:expr, $temperature:expr, |$agent:ident| $body:expr) => {{
        let $agent = $client
            .agent($model)
            .max_tokens(crate::constants::MAX_TOKENS)
            .temperature($temperature)
            .build();
        $body
    }};
}

/// Dispatches an operation across provider-specific clients.
///
/// Matches on [`ClientKind`] and executes the same block for each variant,
/// letting the compiler monomorphize per provider.
macro_rules! dispatch {
    ($self:expr, |$client:ident| $body:expr) => {
        match &$self.client {
            ClientKind::Anthropic($client) => $body,
            ClientKind::OpenAI($client) => $body,
            ClientKind::OpenRouter($client) => $body,
            ClientKind::Ollama($client) => $body,
        }
    };
}

impl Provider {
    /// Creates a new [`Provider`] from the loaded application config.
    ///
    /// Resolves the API key through hira's config precedence chain
    /// (env var → config file → substitution) and builds the appropriate
    /// provider client.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is found for the selected provider
    /// or if client construction fails.
    pub fn from_config(config: &Config, selection: &ModelSelection) -> Result<Self> {
        let temperature = config.temperature();
        match selection.provider {
            ProviderKind::Anthropic => {
                let api_key = config
                    .resolve_api_key("anthropic")
                    .context("No API key found for Anthropic. Set ANTHROPIC_API_KEY or configure it in config.toml")?;
                let client = anthropic::Client::new(&api_key)
                    .context("Failed to create Anthropic client")?;
                Ok(Self {
                    client: ClientKind::Anthropic(client),
                    model: selection.model.clone(),
                    temperature,
                })
            }
            ProviderKind::OpenAI => {
                let api_key = config
                    .resolve_api_key("openai")
                    .context("No API key found for OpenAI. Set OPENAI_API_KEY or configure it in config.toml")?;
                let client =
                    openai::Client::new(&api_key).context("Failed to create OpenAI client")?;
                Ok(Self {
                    client: ClientKind::OpenAI(client),
                    model: selection.model.clone(),
                    temperature,
                })
            }
            ProviderKind::OpenRouter => {
                let api_key = config
                    .resolve_api_key("openrouter")
                    .context("No API key found for OpenRouter. Set OPENROUTER_API_KEY or configure it in config.toml")?;
                let client = openrouter::Client::new(&api_key)
                    .context("Failed to create OpenRouter client")?;
                Ok(Self {
                    client: ClientKind::OpenRouter(client),
                    model: selection.model.clone(),
                    temperature,
                })
            }
            ProviderKind::Ollama => {
                let base_url = config
                    .provider
                    .ollama
                    .as_ref()
                    .and_then(|o| o.base_url.as_deref())
                    .unwrap_or(crate::constants::OLLAMA_DEFAULT_BASE_URL);
                // Hosted Ollama needs a bearer key; a local server accepts
                // any placeholder.
                let api_key = config
                    .resolve_api_key("ollama")
                    .unwrap_or_else(|| "ollama".to_string());
                let client = openai::Client::builder()
                    .api_key(&api_key)
                    .base_url(format!("{}/v1", base_url))
                    .build()
                    .context("Failed to create Ollama client")?;
                Ok(Self {
                    client: ClientKind::Ollama(client),
                    model: selection.model.clone(),
                    temperature,
                })
            }
        }
    }

    /// The resolved model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a prompt to the LLM and returns the full completion text.
    pub async fn prompt(&self, prompt_text: &str) -> Result<String> {
        dispatch!(self, |client| {
            let response = with_agent!(client, &self.model, self.temperature, |agent| {
                agent.prompt(prompt_text).await
            });
            Ok(response?)
        })
    }
}

#[async_trait::async_trait]
impl Generator for Provider {
    /// One completion per THINKING step, bounded by a request timeout so a
    /// hung backend surfaces as a turn fault instead of a stuck process.
    async fn complete(&self, prompt: &str) -> Result<String> {
        let timeout = Duration::from_secs(crate::constants::GENERATOR_TIMEOUT_SECONDS);
        match tokio::time::timeout(timeout, self.prompt(prompt)).await {
            Ok(result) => result,
            Err(_) => anyhow::bail!(
                "the model did not respond within {} seconds",
                timeout.as_secs()
            ),
        }
    }
}
