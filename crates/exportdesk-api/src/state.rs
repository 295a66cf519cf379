//! Application state shared across all route handlers.
//!
//! Nothing in here is mutated after startup: each request is handled
//! independently against the same engine and configuration.

use std::sync::Arc;
use std::time::Instant;

use exportdesk_agent::{ReplyEngine, ReplyGenerator};
use exportdesk_core::config::ServerConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Reply engine invoked by `POST /api/agent`.
    pub engine: Arc<dyn ReplyEngine>,
    /// Server configuration (bind address, CORS, body limit).
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// State backed by the template reply generator.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_engine(config, Arc::new(ReplyGenerator::new()))
    }

    /// State backed by a custom reply engine.
    pub fn with_engine(config: ServerConfig, engine: Arc<dyn ReplyEngine>) -> Self {
        Self {
            engine,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }
}
