//! ExportDesk application binary - composition root.
//!
//! 1. Parse CLI arguments
//! 2. Load configuration from TOML and initialize tracing
//! 3. Either serve the reply endpoint or run the terminal chat console

mod chat;
mod cli;

use clap::Parser;

use exportdesk_api::{start_server, AppState};
use exportdesk_core::config::ExportDeskConfig;

use cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing so the file's log level can apply.
    let config_file = args.resolve_config_path();
    let loaded = ExportDeskConfig::load(&config_file);
    let config_level = loaded
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Tracing.
    let filter = args.resolve_log_level(&config_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&filter)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting ExportDesk v{}", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => {
            tracing::info!(path = %config_file.display(), "Configuration loaded");
            config
        }
        Err(e) => {
            tracing::warn!(
                path = %config_file.display(),
                error = %e,
                "Failed to load config, using defaults"
            );
            ExportDeskConfig::default()
        }
    };

    match args.command {
        Command::Serve { .. } => {
            let mut server = config.server.clone();
            server.port = args.resolve_port(server.port);
            server.host = args.resolve_host(&server.host);

            let addr = server.bind_addr();
            if let Err(e) = start_server(AppState::new(server)).await {
                tracing::error!(addr = %addr, error = %e, "Reply endpoint stopped");
                return Err(e.into());
            }
        }
        Command::Chat { .. } => {
            let endpoint = args.resolve_endpoint(&config.console.endpoint);
            chat::run(endpoint, config.profile.clone(), config.console.history_limit).await?;
        }
    }

    Ok(())
}
