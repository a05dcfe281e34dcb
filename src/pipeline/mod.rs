//! Research → index → draft pipeline
//!
//! [`Pipeline`] owns the three collaborators (search, language model, optional
//! vector store), constructed once at startup and shared across requests. A
//! run threads a [`PipelineState`] through the stages in [`STAGE_ORDER`]: each
//! stage consumes the previous state and returns the next. Every stage runs
//! even if an earlier one failed; failures only populate `error`.
//!
//! # Example
//!
//! ```rust,ignore
//! use rival::pipeline::{Pipeline, PipelineSettings};
//!
//! let pipeline = Pipeline::new(search, llm, Some(store), PipelineSettings::default());
//! let state = pipeline.run("Amazon").await;
//! println!("{}", state.final_report.unwrap_or_default());
//! ```

/// Fixed instructions and prompt templates.
pub mod prompts;
/// Stage functions.
pub mod stages;
/// Pipeline state, stage outcomes and error policy.
pub mod state;

pub use state::{
    DraftUpdate, ErrorPolicy, IndexUpdate, PipelineState, ResearchUpdate, STAGE_ORDER, StageError,
    StageErrorKind, StageKind, StageOutcome, StateUpdate,
};

use crate::llm::{LLMClient, Provider};
use crate::rag::{RagStore, VectorRagStore};
use crate::search::{SearchProvider, WebSearch};
use crate::types::Result;
use crate::utils::toml_config::{PipelineConfig, RivalConfig};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Tunables for a run, taken from `[pipeline]`
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub search_suffix: String,
    pub max_search_results: usize,
    pub retrieve_k: usize,
    pub summarize_temperature: f32,
    pub draft_temperature: f32,
    pub error_policy: ErrorPolicy,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&PipelineConfig::default())
    }
}

impl From<&PipelineConfig> for PipelineSettings {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            search_suffix: config.search_suffix.clone(),
            max_search_results: config.max_search_results,
            retrieve_k: config.retrieve_k,
            summarize_temperature: config.summarize_temperature,
            draft_temperature: config.draft_temperature,
            error_policy: config.error_policy,
        }
    }
}

/// Timing and failure of one stage
#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    pub stage: StageKind,
    pub duration_ms: u64,
    pub error: Option<StageError>,
}

/// Final state plus per-stage reports
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    pub state: PipelineState,
    pub stages: Vec<StageReport>,
    pub duration_ms: u64,
}

impl PipelineRun {
    /// Every stage failure in execution order, regardless of error policy
    pub fn errors(&self) -> impl Iterator<Item = &StageError> {
        self.stages.iter().filter_map(|s| s.error.as_ref())
    }
}

/// The research pipeline with its injected collaborators
pub struct Pipeline {
    search: Arc<dyn WebSearch>,
    llm: Arc<dyn LLMClient>,
    store: Option<Arc<dyn RagStore>>,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(
        search: Arc<dyn WebSearch>,
        llm: Arc<dyn LLMClient>,
        store: Option<Arc<dyn RagStore>>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            search,
            llm,
            store,
            settings,
        }
    }

    /// Build every collaborator from configuration.
    ///
    /// A vector store that fails to open is logged and left out, so each run
    /// reports "RAG store not available" instead of the server refusing to
    /// start.
    ///
    /// # Errors
    ///
    /// Returns an error if the search or LLM client cannot be constructed.
    pub async fn from_config(config: &RivalConfig) -> Result<Self> {
        let search = SearchProvider::from_config(config).create_client()?;

        let provider = Provider::from_config(config);
        let llm = provider.create_client()?;
        info!(provider = provider.name(), model = %llm.model_name(), "LLM client ready");

        let store: Option<Arc<dyn RagStore>> = if config.rag.enabled {
            match VectorRagStore::from_config(&config.rag).await {
                Ok(store) => Some(Arc::new(store)),
                Err(e) => {
                    warn!(error = %e, "Vector store unavailable; running without RAG");
                    None
                }
            }
        } else {
            info!("RAG disabled by configuration");
            None
        };

        Ok(Self::new(
            search,
            llm,
            store,
            PipelineSettings::from(&config.pipeline),
        ))
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Run all stages for `topic` and return the final state
    pub async fn run(&self, topic: impl Into<String>) -> PipelineState {
        self.run_with_report(topic).await.state
    }

    /// Run all stages, keeping per-stage timings and structured errors
    pub async fn run_with_report(&self, topic: impl Into<String>) -> PipelineRun {
        let started = Instant::now();
        let mut state = PipelineState::new(topic);
        let mut stages = Vec::with_capacity(STAGE_ORDER.len());

        for kind in STAGE_ORDER {
            let (next, report) = self.run_stage(kind, state).await;
            state = next;
            stages.push(report);
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        info!(
            topic = %state.topic,
            notes = state.research_notes.len(),
            indexed = state.indexed,
            snippets = state.context_snippets.len(),
            has_report = state.final_report.is_some(),
            duration_ms,
            "Pipeline finished"
        );

        PipelineRun {
            state,
            stages,
            duration_ms,
        }
    }

    /// Run one stage: consume the state, return the next one
    pub async fn run_stage(
        &self,
        kind: StageKind,
        state: PipelineState,
    ) -> (PipelineState, StageReport) {
        let started = Instant::now();
        info!(stage = %kind, topic = %state.topic, "Stage started");

        let store = self.store.as_deref();
        let policy = self.settings.error_policy;

        let (next, error) = match kind {
            StageKind::Research => {
                let outcome = stages::research(
                    &state,
                    self.search.as_ref(),
                    self.llm.as_ref(),
                    &self.settings,
                )
                .await;
                let error = outcome.error().cloned();
                (state.apply(outcome, policy), error)
            }
            StageKind::Index => {
                let outcome = stages::index(&state, store).await;
                let error = outcome.error().cloned();
                (state.apply(outcome, policy), error)
            }
            StageKind::Draft => {
                let outcome =
                    stages::draft(&state, store, self.llm.as_ref(), &self.settings).await;
                let error = outcome.error().cloned();
                (state.apply(outcome, policy), error)
            }
        };

        let duration_ms = started.elapsed().as_millis() as u64;
        match error {
            Some(ref e) => warn!(stage = %kind, topic = %next.topic, duration_ms, error = %e, "Stage failed"),
            None => info!(stage = %kind, topic = %next.topic, duration_ms, "Stage finished"),
        }

        (
            next,
            StageReport {
                stage: kind,
                duration_ms,
                error,
            },
        )
    }
}
