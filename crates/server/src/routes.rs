use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::movies::MovieCatalog;

pub mod movies;

/// Paths answering movie API calls; `/movies.php` keeps old clients working.
pub const MOVIE_API_PATHS: [&str; 2] = ["/api/movies", "/movies.php"];

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn MovieCatalog>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self { Self { catalog } }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Any origin, POST only, JSON bodies.
pub fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = MOVIE_API_PATHS.iter().fold(Router::new(), |router, path| {
        router.route(path, post(movies::movie_action).fallback(movies::method_not_allowed))
    });

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
