//! ExportDesk API crate - axum HTTP server and the reply endpoint.
//!
//! Exposes `POST /api/agent`, which turns a conversation and seller profile
//! into the agent's next reply, and `GET /health`.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, APOLOGY_MESSAGE};
pub use routes::{create_router, start_server};
pub use state::AppState;
