use crate::error::{Result, ShelfError};
use crate::storage::Dataset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".shelf.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShelfConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub data: DataSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Route the endpoint is mounted at.
    #[serde(default = "default_path")]
    pub path: String,

    /// Serve the GraphiQL explorer on plain GET requests.
    #[serde(default = "default_graphiql")]
    pub graphiql: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    1234
}

fn default_path() -> String {
    "/graphql".to_string()
}

fn default_graphiql() -> bool {
    true
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_path(),
            graphiql: default_graphiql(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSettings {
    /// YAML file replacing the built-in sample data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Level for shelf's own events (`error`, `warn`, `info`, `debug`, `trace`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON log file, rotated daily. Relative paths are resolved against the
    /// config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl ShelfConfig {
    /// Load the config found by searching upward from `start_path`.
    ///
    /// Falls back to defaults (and `start_path` as root) when no file exists.
    pub fn discover(start_path: &Path) -> Result<(Self, PathBuf)> {
        match Self::find_config_file(start_path) {
            Some(config_path) => Self::load(&config_path),
            None => Ok((Self::default(), start_path.to_path_buf())),
        }
    }

    /// Load an explicit config file. Returns the config and its directory.
    pub fn load(config_path: &Path) -> Result<(Self, PathBuf)> {
        let content = std::fs::read_to_string(config_path).map_err(|e| {
            ShelfError::Config(format!("Cannot read {}: {}", config_path.display(), e))
        })?;
        let config: ShelfConfig = if content.trim().is_empty() {
            ShelfConfig::default()
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        let root = config_path
            .parent()
            .ok_or_else(|| ShelfError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, root))
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.server.path.starts_with('/') {
            return Err(ShelfError::Config(format!(
                "Server path must start with '/': {}",
                self.server.path
            )));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ShelfError::Config(format!(
                "Unknown log level '{}' (expected one of {})",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    /// Logging settings with CLI overrides applied and the file path resolved.
    pub fn logging_settings(
        &self,
        root: &Path,
        verbose: bool,
        log_file: Option<PathBuf>,
    ) -> LoggingSettings {
        let level = if verbose {
            "debug".to_string()
        } else {
            self.logging.level.clone()
        };
        let file = log_file.or_else(|| self.logging.file.as_ref().map(|f| root.join(f)));
        LoggingSettings { level, file }
    }

    /// The dataset to start with: the seed file if configured, else the sample.
    pub fn initial_dataset(&self, root: &Path) -> Result<Dataset> {
        match &self.data.seed_file {
            Some(seed) => Dataset::load(&root.join(seed)),
            None => Ok(Dataset::sample()),
        }
    }
}
