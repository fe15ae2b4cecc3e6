pub mod request_id;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::controllers::{
    health::HealthController, podcast::PodcastController, upload::UploadController,
    voices::VoicesController,
};
use crate::infrastructure::config::Config;
use request_id::request_id_middleware;

/// Build the application router with all routes configured
pub fn build_router(
    config: &Config,
    health_controller: Arc<HealthController>,
    podcast_controller: Arc<PodcastController>,
    upload_controller: Arc<UploadController>,
    voices_controller: Arc<VoicesController>,
) -> Router {
    let health_routes = Router::new()
        .route("/", get(HealthController::root))
        .route("/api/health", get(HealthController::health))
        .with_state(health_controller);

    let podcast_routes = Router::new()
        .route("/generate-podcast", post(PodcastController::generate_podcast))
        .route("/api/generate", post(PodcastController::generate))
        .route("/audio/:filename", get(PodcastController::serve_audio))
        .with_state(podcast_controller);

    let upload_routes = Router::new()
        .route("/upload-file", post(UploadController::upload_file))
        .with_state(upload_controller);

    let voices_routes = Router::new()
        .route("/voices", get(VoicesController::list_voices))
        .with_state(voices_controller);

    let allowed_origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .merge(health_routes)
        .merge(podcast_routes)
        .merge(upload_routes)
        .merge(voices_routes)
        .layer(cors)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    health_controller: Arc<HealthController>,
    podcast_controller: Arc<PodcastController>,
    upload_controller: Arc<UploadController>,
    voices_controller: Arc<VoicesController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(
        &config,
        health_controller,
        podcast_controller,
        upload_controller,
        voices_controller,
    );

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
