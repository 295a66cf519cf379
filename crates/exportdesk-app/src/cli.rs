//! CLI argument definitions for the ExportDesk binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ExportDesk: an export sales reply endpoint and its chat console.
#[derive(Parser, Debug)]
#[command(name = "exportdesk", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the reply endpoint.
    Serve {
        /// Port to listen on.
        #[arg(short = 'p', long = "port")]
        port: Option<u16>,

        /// Interface to bind.
        #[arg(long = "host")]
        host: Option<String>,
    },
    /// Open an interactive chat console against a running endpoint.
    Chat {
        /// Full URL of the reply endpoint.
        #[arg(short = 'e', long = "endpoint")]
        endpoint: Option<String>,
    },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > EXPORTDESK_CONFIG env var > ~/.exportdesk/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("EXPORTDESK_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the server port.
    ///
    /// Priority: --port flag > EXPORTDESK_PORT env var > config file value.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Command::Serve { port: Some(p), .. } = self.command {
            return p;
        }
        std::env::var("EXPORTDESK_PORT")
            .ok()
            .and_then(|val| val.parse::<u16>().ok())
            .unwrap_or(config_port)
    }

    /// Resolve the bind host. Priority: --host flag > config file value.
    pub fn resolve_host(&self, config_host: &str) -> String {
        match &self.command {
            Command::Serve { host: Some(h), .. } => h.clone(),
            _ => config_host.to_string(),
        }
    }

    /// Resolve the console endpoint. Priority: --endpoint flag > config file value.
    pub fn resolve_endpoint(&self, config_endpoint: &str) -> String {
        match &self.command {
            Command::Chat { endpoint: Some(e) } => e.clone(),
            _ => config_endpoint.to_string(),
        }
    }

    /// Resolve the log filter.
    ///
    /// Priority: --log-level flag > RUST_LOG > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        if let Some(ref level) = self.log_level {
            return level.clone();
        }
        match std::env::var("RUST_LOG") {
            Ok(filter) if !filter.trim().is_empty() => filter,
            _ => config_level.to_string(),
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".exportdesk").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".exportdesk").join("config.toml");
    }
    PathBuf::from("config.toml")
}
