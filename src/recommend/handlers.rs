use axum::{extract::State, Json};
use serde_json::Value;
use tracing::warn;

use crate::server::AppState;
use super::gateway::empty_recommendations;

/// Forwards the request body to the scoring backend. Always answers 200:
/// any backend failure becomes an empty recommendation list.
pub async fn recommend_handler(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Json<Value> {
    match state.recommender.invoke(&payload).await {
        Ok(result) => Json(result),
        Err(e) => {
            warn!("Recommendation failed: {}", e);
            Json(empty_recommendations())
        }
    }
}
