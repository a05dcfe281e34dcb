//! The three stage functions.
//!
//! Each function reads the prior state, calls its collaborators, and returns a
//! [`StageOutcome`]. None of them fail past their own boundary.

use super::PipelineSettings;
use super::prompts::{DRAFT_SYSTEM, SUMMARIZE_SYSTEM, draft_prompt, search_query};
use super::state::{
    DraftUpdate, IndexUpdate, PipelineState, ResearchUpdate, StageError, StageKind, StageOutcome,
};
use crate::llm::LLMClient;
use crate::rag::RagStore;
use crate::search::WebSearch;
use crate::types::{ChunkMetadata, Result};
use tracing::debug;

/// Search the topic and summarize every non-empty hit, in search order.
///
/// On failure no notes are assigned, even if some summaries were produced.
pub async fn research(
    state: &PipelineState,
    search: &dyn WebSearch,
    llm: &dyn LLMClient,
    settings: &PipelineSettings,
) -> StageOutcome<ResearchUpdate> {
    match summarize_hits(state, search, llm, settings).await {
        Ok(notes) => StageOutcome::Completed(ResearchUpdate {
            research_notes: Some(notes),
        }),
        Err(e) => StageOutcome::Failed {
            partial: ResearchUpdate::default(),
            error: StageError::upstream(StageKind::Research, e.message()),
        },
    }
}

async fn summarize_hits(
    state: &PipelineState,
    search: &dyn WebSearch,
    llm: &dyn LLMClient,
    settings: &PipelineSettings,
) -> Result<Vec<String>> {
    let query = search_query(&state.topic, &settings.search_suffix);
    let hits = search.search(&query, settings.max_search_results).await?;
    debug!(query = %query, hits = hits.len(), provider = search.name(), "Search returned");

    let mut notes = Vec::with_capacity(hits.len());
    for hit in hits.iter().filter(|h| !h.trim().is_empty()) {
        let summary = llm
            .complete(SUMMARIZE_SYSTEM, hit, settings.summarize_temperature)
            .await?;
        notes.push(summary);
    }
    Ok(notes)
}

/// Write the research notes to the store, tagged with the topic.
///
/// A missing store is checked before the notes: it is a failure that leaves
/// `indexed` untouched. Empty notes are not a failure.
pub async fn index(state: &PipelineState, store: Option<&dyn RagStore>) -> StageOutcome<IndexUpdate> {
    let Some(store) = store else {
        return StageOutcome::Failed {
            partial: IndexUpdate::default(),
            error: StageError::missing_store(StageKind::Index),
        };
    };

    if state.research_notes.is_empty() {
        return StageOutcome::Completed(IndexUpdate {
            indexed: Some(false),
        });
    }

    let metadata: ChunkMetadata = [("topic".to_string(), state.topic.clone())].into();
    match store.add_texts(&state.research_notes, &metadata).await {
        Ok(chunks) => {
            debug!(chunks, "Research notes indexed");
            StageOutcome::Completed(IndexUpdate {
                indexed: Some(true),
            })
        }
        Err(e) => StageOutcome::Failed {
            partial: IndexUpdate {
                indexed: Some(false),
            },
            error: StageError::upstream(StageKind::Index, e.message()),
        },
    }
}

/// Retrieve context for the topic and draft the report.
///
/// No store means empty context, not a failure. Retrieved snippets are kept
/// even if the model call then fails.
pub async fn draft(
    state: &PipelineState,
    store: Option<&dyn RagStore>,
    llm: &dyn LLMClient,
    settings: &PipelineSettings,
) -> StageOutcome<DraftUpdate> {
    let snippets = match store {
        Some(store) => match store.retrieve(&state.topic, settings.retrieve_k).await {
            Ok(snippets) => snippets,
            Err(e) => {
                return StageOutcome::Failed {
                    partial: DraftUpdate::default(),
                    error: StageError::upstream(StageKind::Draft, e.message()),
                };
            }
        },
        None => Vec::new(),
    };

    let prompt = draft_prompt(&state.topic, &snippets);
    match llm
        .complete(DRAFT_SYSTEM, &prompt, settings.draft_temperature)
        .await
    {
        Ok(report) => StageOutcome::Completed(DraftUpdate {
            context_snippets: Some(snippets),
            final_report: Some(report),
        }),
        Err(e) => StageOutcome::Failed {
            partial: DraftUpdate {
                context_snippets: Some(snippets),
                final_report: None,
            },
            error: StageError::upstream(StageKind::Draft, e.message()),
        },
    }
}
