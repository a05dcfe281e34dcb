//! One-shot `analyze` command output

use super::output::Output;
use crate::pipeline::PipelineRun;

/// Placeholder shown when the draft stage produced nothing
pub const NO_REPORT: &str = "No report";

/// Render a finished run for a terminal
pub fn print_run(run: &PipelineRun, output: &Output) {
    let state = &run.state;

    output.header(&format!("Analysis: {}", state.topic));

    output.subheader("Executive Report");
    match state.final_report.as_deref() {
        Some(report) if !report.trim().is_empty() => output.block(report),
        _ => output.block(NO_REPORT),
    }

    output.subheader(&format!(
        "Context used (snippets): {}",
        state.context_snippets.len()
    ));

    output.subheader("Research notes");
    if state.research_notes.is_empty() {
        output.info("No research notes");
    }
    for (i, note) in state.research_notes.iter().enumerate() {
        output.numbered(i + 1, note);
    }

    output.subheader("Stages");
    output.table_header(&["Stage", "Duration", "Status"]);
    for report in &run.stages {
        let duration = format!("{} ms", report.duration_ms);
        let status = if report.error.is_some() { "failed" } else { "ok" };
        output.table_row(&[report.stage.node_name(), &duration, status]);
    }
    output.kv("Indexed", &state.indexed.to_string());
    output.kv("Total", &format!("{} ms", run.duration_ms));

    output.newline();
    match state.error.as_deref() {
        Some(error) => output.warning(error),
        None => output.success("Pipeline completed without errors"),
    }
}

/// Final state as pretty-printed JSON, the same shape `POST /analyze` returns
pub fn state_json(run: &PipelineRun) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&run.state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{PipelineState, STAGE_ORDER, StageError, StageKind, StageReport};

    fn run_with(state: PipelineState, error: Option<StageError>) -> PipelineRun {
        PipelineRun {
            state,
            stages: STAGE_ORDER
                .iter()
                .map(|&stage| StageReport {
                    stage,
                    duration_ms: 3,
                    error: error.clone().filter(|e| e.stage == stage),
                })
                .collect(),
            duration_ms: 9,
        }
    }

    #[test]
    fn test_state_json_matches_api_shape() {
        let mut state = PipelineState::new("Amazon");
        state.research_notes = vec!["note".to_string()];
        let json = state_json(&run_with(state, None)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["topic"], "Amazon");
        assert_eq!(value["research_notes"][0], "note");
        assert_eq!(value["indexed"], false);
        assert!(value["final_report"].is_null());
        assert!(value["error"].is_null());
        assert!(value.get("stages").is_none());
    }

    #[test]
    fn test_print_run_with_failure_does_not_panic() {
        let mut state = PipelineState::new("Amazon");
        state.error = Some("RAG store not available".to_string());
        let error = StageError::missing_store(StageKind::Index);

        print_run(&run_with(state, Some(error)), &Output::no_color());
    }

    #[test]
    fn test_print_run_with_report_does_not_panic() {
        let mut state = PipelineState::new("Amazon");
        state.research_notes = vec!["a".to_string(), "b".to_string()];
        state.context_snippets = vec!["a".to_string()];
        state.indexed = true;
        state.final_report = Some("# Report\n\n1. Overview".to_string());

        print_run(&run_with(state, None), &Output::new());
    }
}
