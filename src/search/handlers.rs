use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, error};

use crate::server::AppState;
use super::filter::search;
use super::query::{SearchError, SearchQuery};
use super::types::SearchResponse;

pub async fn search_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<SearchResponse>, SearchError> {
    let query = SearchQuery::from_value(&body)?;
    let recommendations = search(&state.catalog, &query);

    debug!("Search {:?} matched {} movies", query, recommendations.len());

    Ok(Json(SearchResponse { recommendations }))
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        // detail stays in the log, the caller only gets a generic message
        error!("Search failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "Server Error" })),
        )
            .into_response()
    }
}
