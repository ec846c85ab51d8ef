use serde::{Deserialize, Serialize};

use crate::catalog::MovieRecord;

/// One search hit. `distance` is always 0: search does no similarity
/// ranking, the field only keeps the shape of recommendation results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub distance: u32,
}

impl From<&MovieRecord> for SearchResult {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            title: movie.title.clone(),
            year: movie.year,
            genres: movie.genres.clone(),
            rating: movie.rating,
            distance: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub recommendations: Vec<SearchResult>,
}
