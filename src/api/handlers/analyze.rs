use crate::{AppState, pipeline::PipelineState, types::AnalyzeRequest};
use axum::{Json, extract::State};
use tracing::info;

/// Run the research pipeline for a topic
///
/// Always answers 200 with the final pipeline state. Stage failures are
/// reported in the `error` field alongside whatever fields were populated.
#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Pipeline finished (check `error` for stage failures)", body = PipelineState),
        (status = 400, description = "Malformed JSON body"),
        (status = 415, description = "Missing JSON content type"),
        (status = 422, description = "Body is missing `topic`")
    ),
    tag = "pipeline"
)]
pub async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Json<PipelineState> {
    info!(topic = %payload.topic, "Analyze request");
    Json(state.pipeline.run(payload.topic).await)
}
