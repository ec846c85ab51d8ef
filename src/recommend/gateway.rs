use async_trait::async_trait;
use serde_json::Value;

/// Something that turns a recommendation request into a JSON answer.
///
/// The HTTP handler only talks to this trait, so the scoring backend can be
/// a subprocess, a remote service or an in-process model.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn invoke(&self, payload: &Value) -> Result<Value, RecommendError>;
}

/// Response sent whenever the scoring backend gives us nothing usable.
pub fn empty_recommendations() -> Value {
    serde_json::json!({ "recommendations": [] })
}

/// Interpret the scoring program's standard output.
pub fn parse_output(stdout: &[u8]) -> Result<Value, RecommendError> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Err(RecommendError::EmptyOutput);
    }
    serde_json::from_slice(stdout).map_err(RecommendError::InvalidOutput)
}

#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("Failed to serialize request: {0}")]
    Serialize(serde_json::Error),
    #[error("Failed to start scoring program: {0}")]
    Spawn(std::io::Error),
    #[error("Failed to collect scoring program output: {0}")]
    Wait(std::io::Error),
    #[error("Scoring program timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("Scoring program wrote nothing to stdout")]
    EmptyOutput,
    #[error("Scoring program output is not JSON: {0}")]
    InvalidOutput(serde_json::Error),
}
