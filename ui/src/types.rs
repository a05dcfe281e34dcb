//! Wire types shared with the rival server

use serde::{Deserialize, Serialize};

/// Body of `POST /analyze`
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub topic: String,
}

/// Final pipeline state returned by `POST /analyze`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PipelineState {
    pub topic: String,
    #[serde(default)]
    pub research_notes: Vec<String>,
    #[serde(default)]
    pub indexed: bool,
    #[serde(default)]
    pub context_snippets: Vec<String>,
    #[serde(default)]
    pub final_report: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error body for non-pipeline failures
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub error: String,
}
