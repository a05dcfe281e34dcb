//! # rival - competitor-analysis research pipeline
//!
//! A small research server: for a topic it searches the web, summarizes each
//! hit with a language model, indexes the notes in a vector store, retrieves
//! the most relevant chunks and drafts an executive report.
//!
//! ## Overview
//!
//! rival can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `rival-server` binary
//! 2. **As a library** - Build a [`Pipeline`] with your own collaborators
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use rival::{Pipeline, RivalConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RivalConfig::load("rival.toml")?;
//!     let pipeline = Pipeline::from_config(&config).await?;
//!
//!     let state = pipeline.run("Amazon").await;
//!     if let Some(error) = &state.error {
//!         eprintln!("advisory: {error}");
//!     }
//!     println!("{}", state.final_report.unwrap_or_default());
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Custom Collaborators
//!
//! Every external dependency sits behind a trait, so tests and embedders can
//! swap them:
//!
//! ```rust,ignore
//! use rival::{Pipeline, PipelineSettings};
//! use std::sync::Arc;
//!
//! let pipeline = Pipeline::new(
//!     Arc::new(my_search),          // impl WebSearch
//!     Arc::new(my_llm),             // impl LLMClient
//!     Some(Arc::new(my_store)),     // impl RagStore, or None
//!     PipelineSettings::default(),
//! );
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `openai` | OpenAI-compatible chat completions, Groq by default (default) |
//! | `ollama` | Ollama local inference (default) |
//! | `local-embeddings` | fastembed ONNX embeddings instead of the hashing embedder |
//! | `swagger-ui` | Interactive API docs at `/swagger-ui` |
//! | `ui` | Serve the built Leptos frontend from `/` |
//!
//! ## Modules
//!
//! - [`pipeline`] - State, stages and the orchestrator
//! - [`search`] - Web search clients (Tavily, DuckDuckGo)
//! - [`llm`] - LLM client implementations
//! - [`rag`] - Chunking, embeddings and the retrieval store
//! - [`db`] - Local vector store
//! - [`api`] - REST API handlers and routes
//! - [`cli`] - Command-line parsing and terminal output
//! - [`types`] - Common types and error handling

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// Local vector store.
pub mod db;
/// LLM provider clients and abstractions.
pub mod llm;
/// Research → index → draft pipeline.
pub mod pipeline;
/// Retrieval Augmented Generation (RAG) components.
pub mod rag;
/// Web search clients.
pub mod search;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::{LLMClient, Provider};
pub use pipeline::{ErrorPolicy, Pipeline, PipelineRun, PipelineSettings, PipelineState};
pub use rag::{RagStore, VectorRagStore};
pub use search::{SearchProvider, WebSearch};
pub use types::{AppError, Result};
pub use utils::toml_config::RivalConfig;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Configuration read once at startup
    pub config: Arc<RivalConfig>,
    /// Pipeline with its collaborators, shared by every request
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(config: RivalConfig, pipeline: Pipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
        }
    }
}
