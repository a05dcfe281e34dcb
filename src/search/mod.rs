//! Web search collaborators
//!
//! The research stage issues one query per run through [`WebSearch`]. Concrete
//! providers never surface failures: transport errors, bad status codes and a
//! missing API key are logged at `warn` and turn into an empty result list.
//!
//! - [`TavilySearch`] - Tavily search API (default)
//! - [`DuckDuckGoSearch`] - DuckDuckGo via `daedra`, no API key required

/// DuckDuckGo search backed by daedra.
pub mod duckduckgo;
/// Tavily REST API client.
pub mod tavily;

use crate::types::Result;
use crate::utils::toml_config::{RivalConfig, SearchProviderKind};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub use duckduckgo::DuckDuckGoSearch;
pub use tavily::TavilySearch;

/// Search collaborator: query in, bounded list of text snippets out
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Return at most `max_results` non-empty snippets, in provider rank order
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>>;

    /// Provider name for logs
    fn name(&self) -> &'static str;
}

/// Search provider selected from the `[search]` configuration section
#[derive(Debug, Clone)]
pub enum SearchProvider {
    Tavily {
        api_key: Option<String>,
        base_url: String,
        timeout: Duration,
    },
    DuckDuckGo,
}

impl SearchProvider {
    pub fn from_config(config: &RivalConfig) -> Self {
        match config.search.provider {
            SearchProviderKind::Tavily => SearchProvider::Tavily {
                api_key: config.search_api_key(),
                base_url: config.search.base_url.clone(),
                timeout: Duration::from_secs(config.search.timeout_secs),
            },
            SearchProviderKind::DuckDuckGo => SearchProvider::DuckDuckGo,
        }
    }

    /// Build the shared search client
    pub fn create_client(&self) -> Result<Arc<dyn WebSearch>> {
        match self {
            SearchProvider::Tavily {
                api_key,
                base_url,
                timeout,
            } => Ok(Arc::new(TavilySearch::new(
                api_key.clone(),
                base_url,
                *timeout,
            )?)),
            SearchProvider::DuckDuckGo => Ok(Arc::new(DuckDuckGoSearch::new())),
        }
    }
}

/// Keep non-blank snippets, trimmed, up to `limit`
pub(crate) fn collect_snippets<I>(candidates: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_snippets_skips_blank_and_missing() {
        let snippets = collect_snippets(
            vec![
                Some("First".to_string()),
                None,
                Some("   ".to_string()),
                Some(" Second ".to_string()),
            ],
            10,
        );
        assert_eq!(snippets, vec!["First", "Second"]);
    }

    #[test]
    fn test_collect_snippets_respects_limit() {
        let snippets = collect_snippets((0..10).map(|i| Some(format!("r{}", i))), 3);
        assert_eq!(snippets, vec!["r0", "r1", "r2"]);
    }

    #[test]
    fn test_provider_from_config() {
        let mut config = RivalConfig::default();
        assert!(matches!(
            SearchProvider::from_config(&config),
            SearchProvider::Tavily { .. }
        ));

        config.search.provider = SearchProviderKind::DuckDuckGo;
        let client = SearchProvider::from_config(&config).create_client().unwrap();
        assert_eq!(client.name(), "duckduckgo");
    }

    #[tokio::test]
    async fn test_mock_search_contract() {
        let mut mock = MockWebSearch::new();
        mock.expect_search()
            .withf(|query, max| query == "Amazon ecommerce competitor analysis" && *max == 6)
            .returning(|_, _| Ok(vec!["Snippet A".to_string()]));

        let results = mock
            .search("Amazon ecommerce competitor analysis", 6)
            .await
            .unwrap();
        assert_eq!(results, vec!["Snippet A"]);
    }
}
