//! Templated reply generation for ExportDesk.
//!
//! Classifies the latest user message with an ordered list of keyword rules
//! and fills the matching template from the seller profile. Pure and
//! deterministic: the same history and profile always yield the same text.

pub mod error;
pub mod intent;
pub mod reply;

pub use error::AgentError;
pub use intent::{classify, Intent, IntentRule};
pub use reply::{ReplyEngine, ReplyGenerator};
