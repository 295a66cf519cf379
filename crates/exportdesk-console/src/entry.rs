//! Console-local conversation entries.

use chrono::{DateTime, Local};
use rand::Rng;
use serde::{Deserialize, Serialize};

use exportdesk_core::types::{Message, Role};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A message as shown in the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    /// `{role}-{epoch millis}-{6 base36 chars}`.
    pub id: String,
    pub role: Role,
    pub content: String,
    /// Display time, `HH:MM` on the local clock.
    pub timestamp: String,
    /// Placeholder awaiting a reply.
    #[serde(default)]
    pub pending: bool,
}

impl ChatEntry {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self::at(role, content, Local::now())
    }

    /// The agent placeholder shown while a reply is in flight.
    pub fn pending() -> Self {
        let mut entry = Self::new(Role::Agent, "");
        entry.pending = true;
        entry
    }

    fn at(role: Role, content: impl Into<String>, now: DateTime<Local>) -> Self {
        Self {
            id: format!("{}-{}-{}", role, now.timestamp_millis(), random_suffix()),
            role,
            content: content.into(),
            timestamp: now.format("%H:%M").to_string(),
            pending: false,
        }
    }

    /// The wire form of this entry.
    pub fn to_message(&self) -> Message {
        Message {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..6)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
