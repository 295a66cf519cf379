//! Plain-text rendering of console turns.

use exportdesk_core::types::{Profile, Role};

use crate::entry::ChatEntry;

/// Shown in place of a pending turn's content.
pub const TYPING_PLACEHOLDER: &str = "Typing…";

const AGENT_PREFIX: &str = "AI  › ";
const USER_PREFIX: &str = "You › ";
const INDENT: &str = "      ";

/// Render one turn. Continuation lines and the timestamp are indented under
/// the first line.
pub fn render_entry(role: Role, content: &str, timestamp: Option<&str>, pending: bool) -> String {
    let prefix = match role {
        Role::Agent => AGENT_PREFIX,
        Role::User => USER_PREFIX,
    };
    let body = if pending { TYPING_PLACEHOLDER } else { content };

    let mut lines: Vec<String> = Vec::new();
    for (i, line) in body.lines().enumerate() {
        let lead = if i == 0 { prefix } else { INDENT };
        lines.push(format!("{}{}", lead, line).trim_end().to_string());
    }
    if lines.is_empty() {
        lines.push(prefix.trim_end().to_string());
    }
    if let Some(ts) = timestamp.filter(|ts| !ts.is_empty()) {
        lines.push(format!("{}{}", INDENT, ts));
    }
    lines.join("\n")
}

/// Console header summarising the active profile.
pub fn render_header(profile: &Profile) -> String {
    let product = match profile.product.trim() {
        "" => "Not set",
        p => p,
    };
    let markets = if profile.target_markets.is_empty() {
        "Global".to_string()
    } else {
        profile.target_markets.join(" / ")
    };
    format!("Product: {} · Markets: {}", product, markets)
}

/// Render every entry in order, separated by blank lines.
pub fn render_transcript(entries: &[ChatEntry]) -> String {
    entries
        .iter()
        .map(|e| render_entry(e.role, &e.content, Some(&e.timestamp), e.pending))
        .collect::<Vec<_>>()
        .join("\n\n")
}
