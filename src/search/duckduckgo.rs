use super::{WebSearch, collect_snippets};
use crate::types::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

/// DuckDuckGo web search powered by daedra
#[derive(Debug, Default, Clone)]
pub struct DuckDuckGoSearch;

impl DuckDuckGoSearch {
    pub fn new() -> Self {
        Self
    }
}

/// Description of a hit, or its title when the description is blank
fn hit_text(title: &str, description: &str) -> Option<String> {
    [description, title]
        .into_iter()
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}

#[async_trait]
impl WebSearch for DuckDuckGoSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        let args = daedra::SearchArgs {
            query: query.to_string(),
            options: Some(daedra::SearchOptions {
                num_results: max_results,
                ..Default::default()
            }),
        };

        match daedra::tools::search::perform_search(&args).await {
            Ok(response) => {
                let snippets = collect_snippets(
                    response
                        .data
                        .iter()
                        .map(|r| hit_text(&r.title, &r.description)),
                    max_results,
                );
                debug!(query, count = snippets.len(), "DuckDuckGo search complete");
                Ok(snippets)
            }
            Err(e) => {
                warn!(query, error = %e, "DuckDuckGo search failed; returning no results");
                Ok(vec![])
            }
        }
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_text_prefers_description() {
        assert_eq!(
            hit_text("Walmart", "Walmart expands grocery delivery").as_deref(),
            Some("Walmart expands grocery delivery")
        );
    }

    #[test]
    fn test_hit_text_falls_back_to_title() {
        assert_eq!(hit_text("Walmart", "  ").as_deref(), Some("Walmart"));
        assert_eq!(hit_text("", ""), None);
    }
}
