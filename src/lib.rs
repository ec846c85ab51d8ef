pub mod catalog;
pub mod config;
pub mod middleware;
pub mod recommend;
pub mod search;
pub mod server;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::catalog::Catalog;
use crate::recommend::{Recommender, ScriptRecommender};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: Option<&str>) -> Result<(), ServerError> {
    let config = config::Config::load(config_path)?;

    match config_path {
        Some(path) => info!("Using config file: {}", path),
        None => info!("No config file given, using defaults"),
    }
    info!("Frontend directory: {}", config.frontend);

    let catalog = Catalog::load_or_empty(&config.catalog);

    info!(
        "Scoring program: {} {}",
        config.recommender.program,
        config.recommender.script.as_deref().unwrap_or("")
    );
    let recommender: Arc<dyn Recommender> =
        Arc::new(ScriptRecommender::from_config(&config.recommender));

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = config.port()?;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let state = server::AppState::new(config, catalog, recommender);
    let app = server::build_router(state);

    info!("Serving HTTP on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
