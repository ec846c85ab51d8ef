use serde::Serialize;
use serde_json::{Map, Value};

/// Separator used when a catalog stores genres as a list instead of a string.
pub const GENRE_SEPARATOR: &str = "|";

/// A catalog entry, normalized at load time.
///
/// The catalog producer is free to name the display title `movie_name` or
/// `title`; that choice is resolved here once so nothing downstream needs to
/// know about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: Option<i64>,
    pub genres: Option<String>,
    pub rating: Option<f64>,
}

impl MovieRecord {
    /// Build a record from one raw catalog object. Fields with an unexpected
    /// JSON type are treated as absent.
    pub fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            title: pick_title(obj),
            year: obj.get("year").and_then(integer_value),
            genres: obj.get("genres").and_then(genres_value),
            rating: obj.get("rating").and_then(Value::as_f64),
        }
    }

    /// Genres as one searchable string, empty when the record has none.
    pub fn genres_str(&self) -> &str {
        self.genres.as_deref().unwrap_or("")
    }

    /// Rating used for threshold filtering; a missing rating counts as 0.
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

fn pick_title(obj: &Map<String, Value>) -> String {
    ["movie_name", "title"]
        .iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or("")
        .to_string()
}

fn integer_value(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    // 2021.0 is still a whole year
    v.as_f64()
        .filter(|f| f.fract() == 0.0 && f.is_finite())
        .map(|f| f as i64)
}

fn genres_value(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            Some(parts.join(GENRE_SEPARATOR))
        }
        _ => None,
    }
}
