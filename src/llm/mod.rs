//! LLM Provider Clients
//!
//! The pipeline talks to language models through the [`LLMClient`] trait and
//! never sees provider-specific types. [`Provider`] maps the `[llm]` section of
//! `rival.toml` to a concrete client.
//!
//! # Supported Providers
//!
//! Enable providers via Cargo features:
//! - `openai` - OpenAI API and compatible endpoints such as Groq
//! - `ollama` - Local Ollama server
//!
//! # Example
//!
//! ```ignore
//! use rival::llm::Provider;
//!
//! let client = Provider::from_config(&config).create_client()?;
//! let summary = client.complete("Summarize this.", &text, 0.0).await?;
//! ```

/// Core LLM client trait and provider selection.
pub mod client;

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "openai")]
pub mod openai;

pub use client::{LLMClient, Provider};
