use serde_json::Value;
use std::path::Path;
use tracing::{error, info, warn};

use super::movie::MovieRecord;

/// Read-only movie catalog, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
}

impl Catalog {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        Self { movies }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a catalog document: a JSON array of movie objects.
    pub fn from_json(path: &str, content: &str) -> Result<Self, CatalogError> {
        let doc: Value = serde_json::from_str(content)
            .map_err(|e| CatalogError::Parse(path.to_string(), e))?;

        let entries = match doc {
            Value::Array(entries) => entries,
            _ => return Err(CatalogError::NotAnArray(path.to_string())),
        };

        let mut movies = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            match entry.as_object() {
                Some(obj) => movies.push(MovieRecord::from_object(obj)),
                None => warn!("Skipping catalog entry {} in {}: not an object", idx, path),
            }
        }

        Ok(Self { movies })
    }

    pub fn from_file(path: &str) -> Result<Self, CatalogError> {
        if !Path::new(path).exists() {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Read(path.to_string(), e))?;

        Self::from_json(path, &content)
    }

    /// Load the catalog, falling back to an empty one on any error. The
    /// server keeps answering (with no search results) instead of exiting.
    pub fn load_or_empty(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(catalog) => {
                info!("Catalog loaded: {} movies from {}", catalog.len(), path);
                catalog
            }
            Err(e) => {
                error!("{}; serving an empty catalog", e);
                Self::empty()
            }
        }
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    NotFound(String),
    #[error("Failed to read catalog {0}: {1}")]
    Read(String, std::io::Error),
    #[error("Failed to parse catalog {0}: {1}")]
    Parse(String, serde_json::Error),
    #[error("Catalog {0} is not a JSON array")]
    NotAnArray(String),
}
