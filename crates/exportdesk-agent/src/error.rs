//! Error types for reply generation.

/// Errors from a reply engine.
///
/// The template generator never produces one; the variants exist for engines
/// plugged in behind [`crate::ReplyEngine`].
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("generation failed: {0}")]
    Generation(String),
    #[error("reply engine unavailable: {0}")]
    Unavailable(String),
}
