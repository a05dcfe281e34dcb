//! Pipeline state and stage outcomes.
//!
//! A [`PipelineState`] is created per request with only `topic` set and moved
//! through the stages in [`STAGE_ORDER`]. Each stage produces a
//! [`StageOutcome`] describing the fields it sets; [`PipelineState::apply`]
//! folds that outcome into the next state. Stage failures are data, not
//! control flow: they end up in the `error` field and the next stage runs
//! regardless.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// The record threaded through research, index and draft.
///
/// Serializes to `{topic, research_notes, indexed, context_snippets,
/// final_report, error}`; absent optionals serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PipelineState {
    /// Input topic, never validated
    pub topic: String,
    /// One summary per search result, in search order
    #[serde(default)]
    pub research_notes: Vec<String>,
    /// True only when notes were non-empty and the store write succeeded
    #[serde(default)]
    pub indexed: bool,
    /// Chunks retrieved as grounding context for the report
    #[serde(default)]
    pub context_snippets: Vec<String>,
    /// Present only after a successful draft
    pub final_report: Option<String>,
    /// Message from the failing stage selected by the error policy
    pub error: Option<String>,
}

impl PipelineState {
    /// Initial state: only the topic is populated
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }

    /// Fold a stage outcome into the state, returning the new state
    pub fn apply<U: StateUpdate>(self, outcome: StageOutcome<U>, policy: ErrorPolicy) -> Self {
        match outcome {
            StageOutcome::Completed(update) => update.merge_into(self),
            StageOutcome::Failed { partial, error } => {
                let mut next = partial.merge_into(self);
                if policy.should_record(next.error.is_some()) {
                    next.error = Some(error.to_string());
                }
                next
            }
        }
    }
}

// ============= Stages =============

/// One step of the fixed pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Research,
    Index,
    Draft,
}

/// Fixed execution order: start → research → index → draft → end
pub const STAGE_ORDER: [StageKind; 3] = [StageKind::Research, StageKind::Index, StageKind::Draft];

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Research => "research",
            StageKind::Index => "index",
            StageKind::Draft => "draft",
        }
    }

    /// Name used as the prefix of failure messages
    pub fn node_name(&self) -> &'static str {
        match self {
            StageKind::Research => "research_node",
            StageKind::Index => "index_node",
            StageKind::Draft => "draft_node",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============= Errors =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StageErrorKind {
    /// The stage needs a vector store and none was configured
    MissingStore,
    /// A search, model or store call failed
    Upstream,
}

/// Structured stage failure; `Display` renders the message stored in
/// [`PipelineState::error`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StageError {
    pub stage: StageKind,
    pub kind: StageErrorKind,
    /// Underlying cause (or the fixed missing-store message)
    pub message: String,
}

impl StageError {
    pub fn missing_store(stage: StageKind) -> Self {
        Self {
            stage,
            kind: StageErrorKind::MissingStore,
            message: "RAG store not available".to_string(),
        }
    }

    /// `cause` is the bare message, e.g. [`AppError::message`](crate::types::AppError::message)
    pub fn upstream(stage: StageKind, cause: impl Into<String>) -> Self {
        Self {
            stage,
            kind: StageErrorKind::Upstream,
            message: cause.into(),
        }
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StageErrorKind::MissingStore => f.write_str(&self.message),
            StageErrorKind::Upstream => {
                write!(f, "{} failed: {}", self.stage.node_name(), self.message)
            }
        }
    }
}

impl std::error::Error for StageError {}

/// Which failure stays visible when more than one stage fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Each failure overwrites the previous one
    #[default]
    LastWins,
    /// The first failure is kept; later ones are only logged
    FirstWins,
}

impl ErrorPolicy {
    fn should_record(&self, has_error: bool) -> bool {
        match self {
            ErrorPolicy::LastWins => true,
            ErrorPolicy::FirstWins => !has_error,
        }
    }
}

// ============= Outcomes =============

/// Result of running one stage
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<U> {
    /// The stage finished; `U` holds the fields it sets
    Completed(U),
    /// The stage failed; `partial` holds the fields it still sets
    Failed { partial: U, error: StageError },
}

impl<U> StageOutcome<U> {
    pub fn error(&self) -> Option<&StageError> {
        match self {
            StageOutcome::Completed(_) => None,
            StageOutcome::Failed { error, .. } => Some(error),
        }
    }
}

/// Fields a stage contributes to the next state
pub trait StateUpdate {
    fn merge_into(self, state: PipelineState) -> PipelineState;
}

/// Research stage contribution. `None` leaves the notes untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResearchUpdate {
    pub research_notes: Option<Vec<String>>,
}

impl StateUpdate for ResearchUpdate {
    fn merge_into(self, mut state: PipelineState) -> PipelineState {
        if let Some(notes) = self.research_notes {
            state.research_notes = notes;
        }
        state
    }
}

/// Index stage contribution. `None` leaves `indexed` untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexUpdate {
    pub indexed: Option<bool>,
}

impl StateUpdate for IndexUpdate {
    fn merge_into(self, mut state: PipelineState) -> PipelineState {
        if let Some(indexed) = self.indexed {
            state.indexed = indexed;
        }
        state
    }
}

/// Draft stage contribution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftUpdate {
    pub context_snippets: Option<Vec<String>>,
    pub final_report: Option<String>,
}

impl StateUpdate for DraftUpdate {
    fn merge_into(self, mut state: PipelineState) -> PipelineState {
        if let Some(snippets) = self.context_snippets {
            state.context_snippets = snippets;
        }
        if let Some(report) = self.final_report {
            state.final_report = Some(report);
        }
        state
    }
}
