//! API client for the rival server

use crate::types::{AnalyzeRequest, ApiError, PipelineState};
use gloo_net::http::Request;

/// Run the pipeline for `topic`
///
/// Stage failures come back inside the state; `Err` is only for transport
/// failures and non-2xx answers.
pub async fn analyze(base_url: &str, topic: &str) -> Result<PipelineState, String> {
    let url = format!("{}/analyze", base_url.trim_end_matches('/'));
    let body = AnalyzeRequest {
        topic: topic.to_string(),
    };

    let resp = Request::post(&url)
        .json(&body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !resp.ok() {
        let status = resp.status();
        if let Ok(err) = resp.json::<ApiError>().await {
            return Err(err.error);
        }
        return Err(format!("Request failed with status {}", status));
    }

    resp.json::<PipelineState>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
