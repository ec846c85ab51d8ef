use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides `listen.port`.
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default = "default_frontend")]
    pub frontend: String,
    #[serde(default = "default_datadir")]
    pub datadir: String,
    #[serde(default = "default_imagedir")]
    pub imagedir: String,
    #[serde(default = "default_catalog")]
    pub catalog: String,
    #[serde(default)]
    pub recommender: RecommenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: ListenConfig::default(),
            frontend: default_frontend(),
            datadir: default_datadir(),
            imagedir: default_imagedir(),
            catalog: default_catalog(),
            recommender: RecommenderConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommenderConfig {
    #[serde(default = "default_program")]
    pub program: String,
    /// Passed as the first argument, before the JSON payload.
    #[serde(default = "default_script")]
    pub script: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            script: default_script(),
            timeout_secs: None,
        }
    }
}

fn default_port() -> String {
    "3000".to_string()
}

fn default_frontend() -> String {
    "../frontend".to_string()
}

fn default_datadir() -> String {
    "../data/processed".to_string()
}

fn default_imagedir() -> String {
    "../images".to_string()
}

fn default_catalog() -> String {
    "../data/processed/db-movies-final.json".to_string()
}

fn default_program() -> String {
    "python".to_string()
}

fn default_script() -> Option<String> {
    Some("../inference/predict.py".to_string())
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        Ok(config)
    }

    /// Load the config file if one was given, otherwise start from defaults,
    /// then apply the `PORT` environment override.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_port_override(std::env::var(PORT_ENV).ok());
        Ok(config)
    }

    pub fn apply_port_override(&mut self, port: Option<String>) {
        if let Some(port) = port {
            let port = port.trim();
            if !port.is_empty() {
                self.listen.port = port.to_string();
            }
        }
    }

    pub fn port(&self) -> Result<u16, ConfigError> {
        self.listen
            .port
            .parse()
            .map_err(|_| ConfigError::InvalidPort(self.listen.port.clone()))
    }

    pub fn index_path(&self) -> PathBuf {
        PathBuf::from(&self.frontend).join("index.html")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("Invalid listen port: {0}")]
    InvalidPort(String),
}
