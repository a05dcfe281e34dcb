//! Mock collaborators for testing.
//!
//! Deterministic stand-ins for the search provider, language model and vector
//! store, shared across integration test files.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use rival::llm::LLMClient;
use rival::rag::RagStore;
use rival::search::WebSearch;
use rival::types::{AppError, ChunkMetadata, Result};

/// Mock LLM client that echoes its (trimmed) user input behind a prefix.
///
/// # Examples
///
/// ```ignore
/// let client = MockLLMClient::echo("SUMMARY: ");
/// let client = MockLLMClient::failing("quota exceeded");
/// ```
pub struct MockLLMClient {
    prefix: String,
    failure: Option<String>,
    calls: Mutex<Vec<(String, String, f32)>>,
}

impl MockLLMClient {
    /// Create a client that returns `prefix` followed by the user prompt.
    pub fn echo(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a client whose every call fails with `AppError::LLM(message)`.
    pub fn failing(message: &str) -> Self {
        Self {
            prefix: String::new(),
            failure: Some(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every `(system, user, temperature)` the client was called with
    pub fn calls(&self) -> Vec<(String, String, f32)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<String> {
        self.calls
            .lock()
            .push((system.to_string(), user.to_string(), temperature));

        match &self.failure {
            Some(message) => Err(AppError::LLM(message.clone())),
            None => Ok(format!("{}{}", self.prefix, user.trim())),
        }
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Search stub with a fixed result list, or a fixed failure.
pub struct StubSearch {
    results: Vec<String>,
    failure: Option<String>,
    queries: Mutex<Vec<(String, usize)>>,
}

impl StubSearch {
    pub fn returning(results: &[&str]) -> Self {
        Self {
            results: results.iter().map(|r| r.to_string()).collect(),
            failure: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::returning(&[])
    }

    pub fn failing(message: &str) -> Self {
        Self {
            results: Vec::new(),
            failure: Some(message.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Every `(query, max_results)` the stub received
    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl WebSearch for StubSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        self.queries.lock().push((query.to_string(), max_results));

        match &self.failure {
            Some(message) => Err(AppError::Search(message.clone())),
            None => Ok(self.results.iter().take(max_results).cloned().collect()),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// In-memory store that keeps whole texts and returns them in insertion order.
#[derive(Default)]
pub struct RecordingStore {
    texts: Mutex<Vec<(String, ChunkMetadata)>>,
    fail_writes: Option<String>,
    fail_reads: Option<String>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_writes(message: &str) -> Self {
        Self {
            fail_writes: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_reads(message: &str) -> Self {
        Self {
            fail_reads: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Everything written so far, with its metadata
    pub fn stored(&self) -> Vec<(String, ChunkMetadata)> {
        self.texts.lock().clone()
    }
}

#[async_trait]
impl RagStore for RecordingStore {
    async fn add_texts(&self, texts: &[String], metadata: &ChunkMetadata) -> Result<usize> {
        if let Some(message) = &self.fail_writes {
            return Err(AppError::VectorStore(message.clone()));
        }

        let mut stored = self.texts.lock();
        for text in texts {
            stored.push((text.clone(), metadata.clone()));
        }
        Ok(texts.len())
    }

    async fn retrieve(&self, _query: &str, k: usize) -> Result<Vec<String>> {
        if let Some(message) = &self.fail_reads {
            return Err(AppError::VectorStore(message.clone()));
        }

        Ok(self
            .texts
            .lock()
            .iter()
            .take(k)
            .map(|(text, _)| text.clone())
            .collect())
    }
}
