pub mod config;
pub mod error;
pub mod request;
pub mod types;

pub use config::ExportDeskConfig;
pub use error::{ExportDeskError, Result};
pub use request::{AgentRequest, AgentResponse, DecodeError, DecodedRequest, HISTORY_LIMIT};
pub use types::*;
