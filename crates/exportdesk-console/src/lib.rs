//! Chat console for ExportDesk.
//!
//! Holds one conversation in memory, sends the recent history and the
//! seller profile to the reply endpoint, and renders the transcript. At most
//! one request is in flight; while it is, a single pending placeholder sits
//! at the end of the transcript.

pub mod console;
pub mod entry;
pub mod error;
pub mod render;
pub mod state;
pub mod transport;

pub use console::{ChatConsole, CLIENT_APOLOGY, INITIAL_GREETING, SUGGESTED_PROMPTS};
pub use entry::ChatEntry;
pub use error::{ConsoleError, TransportError};
pub use render::{render_entry, render_header, render_transcript, TYPING_PLACEHOLDER};
pub use state::ConsoleState;
pub use transport::{HttpTransport, ReplyTransport};
