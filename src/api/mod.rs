//! HTTP API Handlers and Routes
//!
//! The REST layer is built on Axum and exposes the pipeline to the UI.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! - `GET /health` - Liveness check, always `{"ok": true}`
//! - `POST /analyze` - Run the pipeline for `{"topic": "..."}` and return the
//!   final state. Stage failures are reported in the body's `error` field with
//!   HTTP 200.
//! - `GET /api-docs/openapi.json` - OpenAPI document
//!
//! # OpenAPI Documentation
//!
//! When the `swagger-ui` feature is enabled, interactive API documentation
//! is available at `/swagger-ui/`. With the `ui` feature the built frontend is
//! served from `/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
/// Embedded frontend assets.
#[cfg(feature = "ui")]
pub mod ui;

use crate::pipeline::{PipelineState, StageError, StageErrorKind, StageKind};
use crate::types::{AnalyzeRequest, HealthResponse};
use utoipa::OpenApi;

/// OpenAPI document for the public endpoints
#[derive(OpenApi)]
#[openapi(
    info(
        title = "rival",
        description = "Competitor-analysis research pipeline: research, index, draft"
    ),
    paths(handlers::health::health, handlers::analyze::analyze),
    components(schemas(
        AnalyzeRequest,
        HealthResponse,
        PipelineState,
        StageKind,
        StageError,
        StageErrorKind
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "pipeline", description = "Research pipeline")
    )
)]
pub struct ApiDoc;
