//! Error types for the chat console.

use exportdesk_core::error::ExportDeskError;

use crate::state::ConsoleState;

/// Errors from console operations.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("a reply is already in flight")]
    Busy,
    #[error("message cannot be empty")]
    EmptyInput,
    #[error("invalid console transition: {0} -> {1}")]
    InvalidTransition(ConsoleState, ConsoleState),
    #[error("no suggested prompt at index {0}")]
    UnknownSuggestion(usize),
}

/// Errors reaching the reply endpoint or reading its answer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("endpoint returned HTTP {0}")]
    Status(u16),
    #[error("unreadable response: {0}")]
    Decode(String),
    #[error("endpoint reported failure: {0}")]
    Rejected(String),
}

impl From<TransportError> for ExportDeskError {
    fn from(err: TransportError) -> Self {
        ExportDeskError::Transport(err.to_string())
    }
}
