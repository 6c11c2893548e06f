//! LLM provider abstraction for hira.
//!
//! Wraps rig-core's provider clients behind a [`Provider`] struct with enum
//! dispatch, keeping provider-specific details out of the dispatch loop.
//! Supports Anthropic, OpenAI, OpenRouter, and Ollama (local or hosted) via
//! [`ProviderKind`]. The loop consumes a provider through the
//! [`Generator`](crate::agent::Generator) trait.

mod client;
mod kind;
mod resolve;

pub use client::Provider;
#[allow(unused_imports)]
pub use kind::{default_model_for, ProviderKind};
pub use resolve::{resolve_model, ModelSelection};
