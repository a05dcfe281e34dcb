//! Global application state

use crate::types::PipelineState;
use leptos::prelude::*;

/// Topic pre-filled in the input
pub const DEFAULT_TOPIC: &str = "Amazon competitor analysis";

/// Default server address when the UI is served separately (`trunk serve`)
const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Global application state
#[derive(Clone)]
pub struct AppState {
    /// Topic being analyzed
    pub topic: RwSignal<String>,
    /// Last state returned by the server
    pub result: RwSignal<Option<PipelineState>>,
    /// A request is in flight
    pub is_loading: RwSignal<bool>,
    /// Transport or server failure, shown as "Error: <message>"
    pub error: RwSignal<Option<String>>,
    /// API base URL
    pub api_base: RwSignal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            topic: RwSignal::new(DEFAULT_TOPIC.to_string()),
            result: RwSignal::new(None),
            is_loading: RwSignal::new(false),
            error: RwSignal::new(None),
            api_base: RwSignal::new(Self::detect_api_base()),
        }
    }

    /// Same origin when embedded in the server, the default port otherwise
    fn detect_api_base() -> String {
        let origin = web_sys::window().and_then(|w| w.location().origin().ok());
        match origin {
            Some(origin) if origin.ends_with(":8080") => DEFAULT_API_BASE.to_string(),
            Some(origin) => origin,
            None => DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn set_error(&self, msg: impl Into<String>) {
        self.error.set(Some(msg.into()));
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
