//! LLM client abstraction and provider selection
//!
//! The pipeline only ever asks for one thing: a single-turn completion with a
//! system instruction, a user message and a sampling temperature. Providers:
//! - **OpenAI**: any OpenAI-compatible chat completions endpoint (Groq by default)
//! - **Ollama**: local inference

use crate::types::{AppError, Result};
use crate::utils::toml_config::{LlmProviderKind, RivalConfig};
use async_trait::async_trait;
use std::sync::Arc;

/// Generic LLM client trait for provider abstraction
///
/// Implementations trim both the system and the user text before sending
/// them, and return the text of the first completion choice.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Single-turn completion: one system message followed by one user message
    async fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenAI API and compatible endpoints
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::OpenAI {
    ///     api_key: std::env::var("GROQ_API_KEY")?,
    ///     api_base: "https://api.groq.com/openai/v1".to_string(),
    ///     model: "llama-3.3-70b-versatile".to_string(),
    /// };
    /// ```
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
    },

    /// Ollama local LLM provider
    Ollama { base_url: String, model: String },
}

impl Provider {
    /// Build the provider described by the `[llm]` section.
    ///
    /// A missing API key is not an error here: the key resolves to an empty
    /// string and the provider rejects each call, which the pipeline records.
    pub fn from_config(config: &RivalConfig) -> Self {
        match config.llm.provider {
            LlmProviderKind::OpenAI => Provider::OpenAI {
                api_key: config.llm_api_key().unwrap_or_default(),
                api_base: config.llm.api_base.clone(),
                model: config.llm.model.clone(),
            },
            LlmProviderKind::Ollama => Provider::Ollama {
                base_url: config.llm.ollama_url.clone(),
                model: config.llm.model.clone(),
            },
        }
    }

    /// Create a client instance for this provider
    ///
    /// # Errors
    ///
    /// Returns an error if the provider's cargo feature is disabled or the
    /// provider configuration is invalid.
    pub fn create_client(&self) -> Result<Arc<dyn LLMClient>> {
        match self {
            #[cfg(feature = "openai")]
            Provider::OpenAI {
                api_key,
                api_base,
                model,
            } => Ok(Arc::new(super::openai::OpenAIClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
            ))),

            #[cfg(feature = "ollama")]
            Provider::Ollama { base_url, model } => Ok(Arc::new(
                super::ollama::OllamaClient::new(base_url, model.clone())?,
            )),

            #[allow(unreachable_patterns)]
            other => Err(AppError::Configuration(format!(
                "{} provider support is not compiled in; rebuild with the '{}' feature",
                other.name(),
                other.feature_name()
            ))),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "OpenAI",
            Provider::Ollama { .. } => "Ollama",
        }
    }

    /// Cargo feature that enables this provider
    pub fn feature_name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "openai",
            Provider::Ollama { .. } => "ollama",
        }
    }

    /// Model identifier requested from the provider
    pub fn model(&self) -> &str {
        match self {
            Provider::OpenAI { model, .. } | Provider::Ollama { model, .. } => model,
        }
    }
}
