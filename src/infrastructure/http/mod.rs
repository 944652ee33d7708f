pub mod extract;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderName,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::controllers::{health, pipeline::PipelineController};
use crate::domain::pipeline::PipelineService;
use crate::infrastructure::config::Config;
use crate::infrastructure::middleware::{request_id_middleware, X_REQUEST_ID};

/// Build the application router.
///
/// `max_audio_bytes` is the decoded audio limit; the request body limit is
/// sized for its base64 encoding plus envelope overhead.
pub fn create_router(
    pipeline_service: Arc<PipelineService>,
    pipeline_controller: Arc<PipelineController>,
    max_audio_bytes: usize,
) -> Router {
    let body_limit = max_audio_bytes / 3 * 4 + 64 * 1024;

    // Job routes
    let pipeline_routes = Router::new()
        .route("/run", post(PipelineController::run_job))
        .route("/api/translate", post(PipelineController::translate))
        .with_state(pipeline_controller)
        .layer(DefaultBodyLimit::max(body_limit));

    // Browser clients post data URLs straight from a recorder
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(X_REQUEST_ID)]);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pipeline_service)
        .merge(pipeline_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(cors)
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    router: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
