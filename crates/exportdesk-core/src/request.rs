//! Wire contract between the chat console and the reply endpoint.
//!
//! Inbound bodies go through [`AgentRequest::decode`], which turns any JSON
//! document into a validated request with typed defaults. The only failure
//! is a body that is not JSON at all.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Message, Profile};

/// Maximum number of history messages the console sends per request.
pub const HISTORY_LIMIT: usize = 10;

/// Request body for `POST /api/agent`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRequest {
    pub messages: Vec<Message>,
    pub profile: Profile,
}

/// Response body for `POST /api/agent`, on success and on failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub success: bool,
    pub message: String,
}

impl AgentResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// The body was not a JSON document.
#[derive(Debug, thiserror::Error)]
#[error("malformed request body: {0}")]
pub struct DecodeError(String);

/// A decoded request plus a record of the normalizations applied to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedRequest {
    pub request: AgentRequest,
    /// `messages` was absent or not an array.
    pub messages_defaulted: bool,
    /// `profile` was absent, not an object, or had mistyped fields.
    pub profile_defaulted: bool,
    /// Array elements skipped because they were not `{role, content}`.
    pub dropped_messages: usize,
}

impl AgentRequest {
    /// Build a request from the tail of a conversation.
    ///
    /// Keeps at most [`HISTORY_LIMIT`] messages, preserving order.
    pub fn from_history(history: &[Message], profile: Profile) -> Self {
        Self {
            messages: recent_history(history, HISTORY_LIMIT).to_vec(),
            profile,
        }
    }

    /// Decode a raw request body.
    ///
    /// - `messages` that is not an array becomes an empty history.
    /// - `profile` that is not a non-null object, or fails to decode, becomes
    ///   [`Profile::endpoint_default`].
    /// - A non-object root is treated as `{}`.
    pub fn decode(body: &[u8]) -> Result<DecodedRequest, DecodeError> {
        let root: Value =
            serde_json::from_slice(body).map_err(|e| DecodeError(e.to_string()))?;

        let (messages, messages_defaulted, dropped_messages) = match root.get("messages") {
            Some(Value::Array(items)) => {
                let messages: Vec<Message> = items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect();
                let dropped = items.len() - messages.len();
                (messages, false, dropped)
            }
            _ => (Vec::new(), true, 0),
        };

        let (profile, profile_defaulted) = match root.get("profile") {
            Some(value @ Value::Object(_)) => match serde_json::from_value(value.clone()) {
                Ok(profile) => (profile, false),
                Err(e) => {
                    tracing::debug!(error = %e, "Profile did not decode, using default");
                    (Profile::endpoint_default(), true)
                }
            },
            _ => (Profile::endpoint_default(), true),
        };

        Ok(DecodedRequest {
            request: AgentRequest { messages, profile },
            messages_defaulted,
            profile_defaulted,
            dropped_messages,
        })
    }
}

/// The suffix of `history` holding at most `limit` messages.
pub fn recent_history(history: &[Message], limit: usize) -> &[Message] {
    &history[history.len().saturating_sub(limit)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn decode(body: &str) -> DecodedRequest {
        AgentRequest::decode(body.as_bytes()).unwrap()
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let decoded = decode("{}");
        assert!(decoded.request.messages.is_empty());
        assert_eq!(decoded.request.profile, Profile::endpoint_default());
        assert!(decoded.messages_defaulted);
        assert!(decoded.profile_defaulted);
    }

    #[test]
    fn test_messages_as_string_becomes_empty() {
        let decoded = decode(r#"{"messages":"price please"}"#);
        assert!(decoded.request.messages.is_empty());
        assert!(decoded.messages_defaulted);
    }

    #[test]
    fn test_profile_null_uses_default() {
        let decoded = decode(r#"{"profile":null}"#);
        assert_eq!(decoded.request.profile, Profile::endpoint_default());
        assert!(decoded.profile_defaulted);
    }

    #[test]
    fn test_profile_array_uses_default() {
        let decoded = decode(r#"{"profile":["Rice"]}"#);
        assert_eq!(decoded.request.profile, Profile::endpoint_default());
    }

    #[test]
    fn test_profile_with_mistyped_field_uses_default() {
        let decoded = decode(r#"{"profile":{"product":42}}"#);
        assert_eq!(decoded.request.profile, Profile::endpoint_default());
        assert!(decoded.profile_defaulted);
    }

    #[test]
    fn test_partial_profile_is_kept() {
        let decoded = decode(r#"{"profile":{"product":"Cashews","pricePoint":"$7/kg"}}"#);
        assert!(!decoded.profile_defaulted);
        assert_eq!(decoded.request.profile.product, "Cashews");
        assert_eq!(decoded.request.profile.price_point, "$7/kg");
        assert!(decoded.request.profile.incoterm.is_empty());
    }

    #[test]
    fn test_null_profile_fields_keep_the_rest() {
        let decoded = decode(
            r#"{"profile":{"product":"Cashews","pricePoint":"$7/kg","targetMarkets":null,"incoterm":null}}"#,
        );
        assert!(!decoded.profile_defaulted);
        let profile = decoded.request.profile;
        assert_eq!(profile.product, "Cashews");
        assert_eq!(profile.price_point, "$7/kg");
        assert!(profile.target_markets.is_empty());
        assert!(profile.incoterm.is_empty());
    }

    #[test]
    fn test_invalid_message_elements_are_dropped() {
        let decoded = decode(
            r#"{"messages":[
                {"role":"user","content":"hello"},
                {"role":"system","content":"ignored"},
                42,
                {"role":"agent","content":"hi there"}
            ]}"#,
        );
        assert_eq!(decoded.dropped_messages, 2);
        assert!(!decoded.messages_defaulted);
        let roles: Vec<Role> = decoded.request.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Agent]);
    }

    #[test]
    fn test_non_object_root_uses_defaults() {
        for body in ["[]", "\"text\"", "7", "null"] {
            let decoded = decode(body);
            assert!(decoded.request.messages.is_empty(), "body {body}");
            assert_eq!(decoded.request.profile, Profile::endpoint_default());
        }
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = AgentRequest::decode(b"{not json").unwrap_err();
        assert!(err.to_string().starts_with("malformed request body"));
        assert!(AgentRequest::decode(b"").is_err());
    }

    #[test]
    fn test_from_history_keeps_last_ten_in_order() {
        let history: Vec<Message> = (0..14).map(|i| Message::user(format!("m{i}"))).collect();
        let request = AgentRequest::from_history(&history, Profile::sample());
        assert_eq!(request.messages.len(), HISTORY_LIMIT);
        assert_eq!(request.messages.first().unwrap().content, "m4");
        assert_eq!(request.messages.last().unwrap().content, "m13");
    }

    #[test]
    fn test_recent_history_shorter_than_limit() {
        let history = vec![Message::agent("hi"), Message::user("price?")];
        assert_eq!(recent_history(&history, HISTORY_LIMIT), history.as_slice());
        assert!(recent_history(&[], HISTORY_LIMIT).is_empty());
    }

    #[test]
    fn test_response_constructors() {
        let ok = AgentResponse::ok("done");
        assert!(ok.success);
        let json = serde_json::to_string(&AgentResponse::failure("sorry")).unwrap();
        assert_eq!(json, r#"{"success":false,"message":"sorry"}"#);
    }
}
