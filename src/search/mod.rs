pub mod filter;
pub mod handlers;
pub mod query;
pub mod types;

pub use filter::search;
pub use handlers::*;
pub use query::{Constraint, SearchError, SearchQuery};
pub use types::{SearchResponse, SearchResult};
