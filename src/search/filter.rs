use crate::catalog::{Catalog, MovieRecord};

use super::query::SearchQuery;
use super::types::SearchResult;

impl SearchQuery {
    /// True if the movie passes every supplied constraint.
    pub fn matches(&self, movie: &MovieRecord) -> bool {
        self.name
            .check(|name| movie.title.to_lowercase().contains(name.as_str()))
            && self.genre.check(|genre| movie.genres_str().contains(genre.as_str()))
            && self.year.check(|year| movie.year == Some(*year))
            && self.min_rating.check(|min| movie.rating_or_zero() >= *min)
    }
}

/// Linear scan over the catalog. Results keep catalog order.
pub fn search(catalog: &Catalog, query: &SearchQuery) -> Vec<SearchResult> {
    catalog
        .movies()
        .iter()
        .filter(|movie| query.matches(movie))
        .map(SearchResult::from)
        .collect()
}
