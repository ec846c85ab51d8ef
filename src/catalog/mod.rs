pub mod movie;
pub mod store;

pub use movie::{MovieRecord, GENRE_SEPARATOR};
pub use store::{Catalog, CatalogError};
