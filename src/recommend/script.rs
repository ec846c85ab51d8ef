use async_trait::async_trait;
use serde_json::Value;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::RecommenderConfig;
use super::gateway::{parse_output, RecommendError, Recommender};

/// Runs an external scoring program once per request:
/// `<program> [script] <payload-json>`.
///
/// Only standard output decides the result. The exit status and anything on
/// standard error are logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct ScriptRecommender {
    program: String,
    script: Option<String>,
    timeout: Option<Duration>,
}

impl ScriptRecommender {
    pub fn new(program: impl Into<String>, script: Option<String>) -> Self {
        Self {
            program: program.into(),
            script,
            timeout: None,
        }
    }

    pub fn from_config(config: &RecommenderConfig) -> Self {
        let mut rec = Self::new(config.program.clone(), config.script.clone());
        if let Some(secs) = config.timeout_secs {
            rec = rec.with_timeout(Duration::from_secs(secs));
        }
        rec
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn command(&self, payload: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(ref script) = self.script {
            cmd.arg(script);
        }
        cmd.arg(payload)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // without a timeout the child is left to finish on its own
            .kill_on_drop(self.timeout.is_some());
        cmd
    }
}

#[async_trait]
impl Recommender for ScriptRecommender {
    async fn invoke(&self, payload: &Value) -> Result<Value, RecommendError> {
        let arg = serde_json::to_string(payload).map_err(RecommendError::Serialize)?;

        debug!("Spawning scoring program {} {:?}", self.program, self.script);
        let child = self.command(&arg).spawn().map_err(RecommendError::Spawn)?;

        let output = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, child.wait_with_output())
                .await
                .map_err(|_| RecommendError::Timeout(timeout))?,
            None => child.wait_with_output().await,
        }
        .map_err(RecommendError::Wait)?;

        if !output.status.success() {
            warn!("Scoring program exited with {}", output.status);
        }
        if !output.stderr.is_empty() {
            warn!(
                "Scoring program stderr: {}",
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }

        parse_output(&output.stdout)
    }
}
