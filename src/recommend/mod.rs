pub mod gateway;
pub mod handlers;
pub mod script;

pub use gateway::{empty_recommendations, RecommendError, Recommender};
pub use handlers::*;
pub use script::ScriptRecommender;
