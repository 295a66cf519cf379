use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ExportDeskError, Result};
use crate::request::HISTORY_LIMIT;
use crate::types::Profile;

/// Top-level configuration for ExportDesk.
///
/// Loaded from `~/.exportdesk/config.toml` by default. Every section falls
/// back to its defaults when missing from the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportDeskConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Starting seller profile for the console.
    #[serde(default = "Profile::sample")]
    pub profile: Profile,
}

impl ExportDeskConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ExportDeskConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ExportDeskError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject values the server or console cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.console.history_limit == 0 || self.console.history_limit > HISTORY_LIMIT {
            return Err(ExportDeskError::Config(format!(
                "console.history_limit must be between 1 and {}",
                HISTORY_LIMIT
            )));
        }
        if self.server.max_body_bytes < 1024 {
            return Err(ExportDeskError::Config(
                "server.max_body_bytes must be at least 1024".to_string(),
            ));
        }
        if self.console.endpoint.trim().is_empty() {
            return Err(ExportDeskError::Config(
                "console.endpoint must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reply endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
    /// Browser origins allowed to call the endpoint.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3040,
            max_body_bytes: 64 * 1024,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Terminal console settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Full URL of the reply endpoint.
    pub endpoint: String,
    /// Messages sent per request (at most 10).
    pub history_limit: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3040/api/agent".to_string(),
            history_limit: HISTORY_LIMIT,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
