use super::{WebSearch, collect_snippets};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl TavilyResult {
    /// `content`, falling back to `title` when content is blank
    fn snippet(self) -> Option<String> {
        self.content
            .filter(|c| !c.trim().is_empty())
            .or(self.title)
    }
}

/// Tavily search API client
pub struct TavilySearch {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl TavilySearch {
    pub fn new(api_key: Option<String>, base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Search(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: api_key.filter(|k| !k.is_empty()),
            endpoint: format!("{}/search", base_url.trim_end_matches('/')),
        })
    }

    async fn fetch(&self, api_key: &str, query: &str, max_results: usize) -> Result<Vec<String>> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&TavilyRequest { query, max_results })
            .send()
            .await
            .map_err(|e| AppError::Search(format!("Tavily request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Search(format!("Tavily returned HTTP {}", status)));
        }

        let body: TavilyResponse = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Invalid Tavily response: {}", e)))?;

        Ok(collect_snippets(
            body.results.into_iter().map(TavilyResult::snippet),
            max_results,
        ))
    }
}

#[async_trait]
impl WebSearch for TavilySearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("Tavily API key is not set; returning no search results");
            return Ok(vec![]);
        };

        match self.fetch(api_key, query, max_results).await {
            Ok(snippets) => {
                debug!(query, count = snippets.len(), "Tavily search complete");
                Ok(snippets)
            }
            Err(e) => {
                warn!(query, error = %e, "Tavily search failed; returning no results");
                Ok(vec![])
            }
        }
    }

    fn name(&self) -> &'static str {
        "tavily"
    }
}
