use crate::AppState;
use crate::api::ApiDoc;
use crate::api::handlers::{analyze, health};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// Pipeline routes without state or middleware
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/analyze", post(analyze::analyze))
}

/// Full application: routes, API docs, optional UI, and middleware layers
pub fn build_app(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let router = create_router();

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(
        "/api-docs/openapi.json",
        get(|| async { axum::Json(ApiDoc::openapi()) }),
    );

    #[cfg(feature = "ui")]
    let router = router.fallback(crate::api::ui::static_handler);

    // The UI dev server runs on another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Pipeline, PipelineSettings};
    use crate::search::MockWebSearch;
    use crate::types::Result;
    use crate::utils::toml_config::RivalConfig;
    use crate::LLMClient;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct SilentLLM;

    #[async_trait]
    impl LLMClient for SilentLLM {
        async fn complete(&self, _system: &str, _user: &str, _temperature: f32) -> Result<String> {
            Ok(String::new())
        }

        fn model_name(&self) -> &str {
            "silent"
        }
    }

    fn app() -> Router {
        let mut search = MockWebSearch::new();
        search.expect_search().returning(|_, _| Ok(vec![]));
        search.expect_name().return_const("mock");

        let pipeline = Pipeline::new(
            Arc::new(search),
            Arc::new(SilentLLM),
            None,
            PipelineSettings::default(),
        );
        build_app(AppState::new(RivalConfig::default(), pipeline))
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/analyze")
            .header(header::ORIGIN, "http://localhost:8080")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[cfg(not(feature = "ui"))]
    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = app()
            .oneshot(Request::get("/api/agents").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
