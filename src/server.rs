use axum::{
    routing::post,
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::recommend::Recommender;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub recommender: Arc<dyn Recommender>,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog, recommender: Arc<dyn Recommender>) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            recommender,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let api_routes = Router::new()
        .route("/api/search", post(crate::search::search_handler))
        .route("/api/recommend", post(crate::recommend::recommend_handler));

    Router::new()
        .route_service("/", ServeFile::new(config.index_path()))
        .merge(api_routes)
        .nest_service("/data", ServeDir::new(&config.datadir))
        .nest_service("/images", ServeDir::new(&config.imagedir))
        .fallback_service(ServeDir::new(&config.frontend))
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
