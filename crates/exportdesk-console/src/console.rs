//! The chat console: owned conversation state plus the send cycle.
//!
//! A send is split into [`ChatConsole::begin_send`], which appends the user
//! entry and the pending placeholder and returns the outbound request, and
//! [`ChatConsole::settle`], which replaces the placeholder and returns the
//! console to idle. [`ChatConsole::send`] runs both around the transport.

use exportdesk_core::request::{recent_history, AgentRequest, AgentResponse, HISTORY_LIMIT};
use exportdesk_core::types::{Message, Profile, Role};

use crate::entry::ChatEntry;
use crate::error::{ConsoleError, TransportError};
use crate::state::ConsoleState;
use crate::transport::ReplyTransport;

/// First agent entry of every conversation.
pub const INITIAL_GREETING: &str = "Namaste! Main aapka export sales agent hoon. Product details share karein, main buyers ke liye pitch, pricing aur follow-up plan ready karunga.";

/// Replaces the placeholder when a reply cannot be obtained.
pub const CLIENT_APOLOGY: &str =
    "I'm unable to generate guidance right now. Please retry after a moment.";

/// One-click prompts offered under the transcript.
pub const SUGGESTED_PROMPTS: [&str; 3] = [
    "Craft a LinkedIn pitch for an importer in Dubai asking for MOQ 500 units.",
    "Plan a follow-up email for a German buyer focusing on certifications.",
    "Help me structure an export quotation for CIF Singapore with 20% margin.",
];

/// In-memory chat console bound to a reply transport.
pub struct ChatConsole<T> {
    transport: T,
    entries: Vec<ChatEntry>,
    input: String,
    profile: Profile,
    state: ConsoleState,
    history_limit: usize,
}

impl<T: ReplyTransport> ChatConsole<T> {
    /// A console holding only the initial greeting.
    pub fn new(transport: T, profile: Profile) -> Self {
        Self {
            transport,
            entries: vec![ChatEntry::new(Role::Agent, INITIAL_GREETING)],
            input: String::new(),
            profile,
            state: ConsoleState::Idle,
            history_limit: HISTORY_LIMIT,
        }
    }

    /// Send fewer than ten messages per request. Values are clamped to `1..=10`.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.clamp(1, HISTORY_LIMIT);
        self
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn state(&self) -> ConsoleState {
        self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Whether a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.state == ConsoleState::Sending
    }

    /// Whether the send button would be enabled.
    pub fn can_send(&self) -> bool {
        !self.is_loading() && !self.input.trim().is_empty()
    }

    /// Replace the profile wholesale. Not allowed while a request is in flight.
    pub fn set_profile(&mut self, profile: Profile) -> Result<(), ConsoleError> {
        if self.is_loading() {
            return Err(ConsoleError::Busy);
        }
        self.profile = profile;
        Ok(())
    }

    /// The settled conversation as wire messages, oldest first.
    pub fn history(&self) -> Vec<Message> {
        self.entries
            .iter()
            .filter(|e| !e.pending)
            .map(ChatEntry::to_message)
            .collect()
    }

    // -----------------------------------------------------------------
    // Send cycle
    // -----------------------------------------------------------------

    /// Submit the current input field.
    pub async fn submit(&mut self) -> Result<ConsoleState, ConsoleError> {
        let text = self.input.clone();
        self.send(&text).await
    }

    /// Send one of [`SUGGESTED_PROMPTS`].
    pub async fn send_suggestion(&mut self, index: usize) -> Result<ConsoleState, ConsoleError> {
        let prompt: &'static str = *SUGGESTED_PROMPTS
            .get(index)
            .ok_or(ConsoleError::UnknownSuggestion(index))?;
        self.send(prompt).await
    }

    /// Send `text` and wait for the outcome.
    ///
    /// Returns `Settled` or `Failed`; the console is idle again either way.
    pub async fn send(&mut self, text: &str) -> Result<ConsoleState, ConsoleError> {
        let request = self.begin_send(text)?;
        let outcome = self.transport.request_reply(&request).await;
        self.settle(outcome)
    }

    /// Start a turn: append the user entry and the pending placeholder.
    ///
    /// The returned request carries the last `history_limit` messages, ending
    /// with the new user message, and the full current profile.
    pub fn begin_send(&mut self, text: &str) -> Result<AgentRequest, ConsoleError> {
        if self.is_loading() {
            return Err(ConsoleError::Busy);
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ConsoleError::EmptyInput);
        }

        self.transition(ConsoleState::Sending)?;

        let user_entry = ChatEntry::new(Role::User, trimmed);
        let mut history = self.history();
        history.push(user_entry.to_message());

        let request = AgentRequest {
            messages: recent_history(&history, self.history_limit).to_vec(),
            profile: self.profile.clone(),
        };

        self.entries.push(user_entry);
        self.entries.push(ChatEntry::pending());

        tracing::debug!(
            history_len = request.messages.len(),
            entries = self.entries.len(),
            "Console sending"
        );
        Ok(request)
    }

    /// Finish a turn with the transport's outcome.
    ///
    /// The pending placeholder is replaced in place by the reply, or by
    /// [`CLIENT_APOLOGY`] on any failure. The input is then cleared and the
    /// console returns to idle.
    pub fn settle(
        &mut self,
        outcome: Result<AgentResponse, TransportError>,
    ) -> Result<ConsoleState, ConsoleError> {
        if !self.is_loading() {
            return Err(ConsoleError::InvalidTransition(
                self.state,
                ConsoleState::Settled,
            ));
        }

        let outcome = outcome.and_then(|resp| {
            if resp.success {
                Ok(resp.message)
            } else {
                Err(TransportError::Rejected(resp.message))
            }
        });

        let (content, next) = match outcome {
            Ok(reply) => (reply, ConsoleState::Settled),
            Err(e) => {
                tracing::warn!(error = %e, "Agent request failed");
                (CLIENT_APOLOGY.to_string(), ConsoleState::Failed)
            }
        };

        let reply = ChatEntry::new(Role::Agent, content);
        match self.entries.iter().rposition(|e| e.pending) {
            Some(index) => self.entries[index] = reply,
            None => self.entries.push(reply),
        }
        self.transition(next)?;

        self.input.clear();
        self.transition(ConsoleState::Idle)?;
        Ok(next)
    }

    fn transition(&mut self, to: ConsoleState) -> Result<(), ConsoleError> {
        if !self.state.can_transition_to(&to) {
            return Err(ConsoleError::InvalidTransition(self.state, to));
        }
        self.state = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned outcomes and records every request it receives.
    #[derive(Default)]
    struct ScriptedTransport {
        outcomes: Mutex<VecDeque<Result<AgentResponse, TransportError>>>,
        seen: Mutex<Vec<AgentRequest>>,
    }

    impl ScriptedTransport {
        fn replying(replies: &[&str]) -> Self {
            let transport = Self::default();
            for reply in replies {
                transport.push(Ok(AgentResponse::ok(*reply)));
            }
            transport
        }

        fn push(&self, outcome: Result<AgentResponse, TransportError>) {
            self.outcomes.lock().unwrap().push_back(outcome);
        }

        fn requests(&self) -> Vec<AgentRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReplyTransport for ScriptedTransport {
        async fn request_reply(
            &self,
            request: &AgentRequest,
        ) -> Result<AgentResponse, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Http("no scripted reply".into())))
        }
    }

    fn console(transport: ScriptedTransport) -> ChatConsole<ScriptedTransport> {
        ChatConsole::new(transport, Profile::sample())
    }

    fn pending_count<T: ReplyTransport>(console: &ChatConsole<T>) -> usize {
        console.entries().iter().filter(|e| e.pending).count()
    }

    // ---- Initial state ----

    #[test]
    fn test_starts_with_greeting() {
        let console = console(ScriptedTransport::default());
        assert_eq!(console.entries().len(), 1);
        assert_eq!(console.entries()[0].role, Role::Agent);
        assert_eq!(console.entries()[0].content, INITIAL_GREETING);
        assert_eq!(console.state(), ConsoleState::Idle);
    }

    #[test]
    fn test_can_send_requires_input() {
        let mut console = console(ScriptedTransport::default());
        assert!(!console.can_send());
        console.set_input("   ");
        assert!(!console.can_send());
        console.set_input("price?");
        assert!(console.can_send());
    }

    // ---- Successful turn ----

    #[tokio::test]
    async fn test_successful_send_replaces_placeholder() {
        let mut console = console(ScriptedTransport::replying(&["Pricing playbook ..."]));
        console.set_input("  What price?  ");

        let outcome = console.submit().await.unwrap();

        assert_eq!(outcome, ConsoleState::Settled);
        assert_eq!(console.state(), ConsoleState::Idle);
        assert_eq!(console.input(), "");
        let entries = console.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].role, Role::User);
        assert_eq!(entries[1].content, "What price?");
        assert_eq!(entries[2].role, Role::Agent);
        assert_eq!(entries[2].content, "Pricing playbook ...");
        assert!(!entries[2].pending);
    }

    #[tokio::test]
    async fn test_request_carries_history_and_profile() {
        let mut console = console(ScriptedTransport::replying(&["ok"]));
        console.send("Quote for UK").await.unwrap();

        let requests = console.transport().requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(
            request.messages,
            vec![Message::agent(INITIAL_GREETING), Message::user("Quote for UK")]
        );
        assert_eq!(request.profile, Profile::sample());
    }

    #[tokio::test]
    async fn test_suggestion_sends_prompt_text() {
        let mut console = console(ScriptedTransport::replying(&["draft"]));
        console.send_suggestion(2).await.unwrap();

        let request = &console.transport().requests()[0];
        assert_eq!(request.messages.last().unwrap().content, SUGGESTED_PROMPTS[2]);
    }

    #[tokio::test]
    async fn test_unknown_suggestion_is_rejected() {
        let mut console = console(ScriptedTransport::default());
        let err = console.send_suggestion(3).await.unwrap_err();
        assert!(matches!(err, ConsoleError::UnknownSuggestion(3)));
        assert_eq!(console.entries().len(), 1);
    }

    // ---- History window ----

    #[tokio::test]
    async fn test_history_never_exceeds_ten_and_keeps_order() {
        let replies: Vec<String> = (0..8).map(|i| format!("reply {i}")).collect();
        let refs: Vec<&str> = replies.iter().map(String::as_str).collect();
        let mut console = console(ScriptedTransport::replying(&refs));

        for i in 0..8 {
            console.send(&format!("question {i}")).await.unwrap();
        }

        for request in console.transport().requests() {
            assert!(request.messages.len() <= HISTORY_LIMIT);
            assert_eq!(request.messages.last().unwrap().role, Role::User);
        }

        let last = console.transport().requests().pop().unwrap();
        assert_eq!(last.messages.len(), 10);
        let contents: Vec<&str> = last.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents[0], "reply 2");
        assert_eq!(contents[1], "question 3");
        assert_eq!(contents[9], "question 7");
    }

    #[tokio::test]
    async fn test_custom_history_limit() {
        let mut console =
            console(ScriptedTransport::replying(&["a", "b"])).with_history_limit(3);
        console.send("one").await.unwrap();
        console.send("two").await.unwrap();

        let last = console.transport().requests().pop().unwrap();
        assert_eq!(
            last.messages,
            vec![Message::user("one"), Message::agent("a"), Message::user("two")]
        );
    }

    // ---- Failure paths ----

    #[tokio::test]
    async fn test_network_failure_shows_apology_and_reenables_send() {
        let transport = ScriptedTransport::default();
        transport.push(Err(TransportError::Http("connection reset".into())));
        let mut console = console(transport);
        console.set_input("Need a follow-up");

        let outcome = console.submit().await.unwrap();

        assert_eq!(outcome, ConsoleState::Failed);
        assert_eq!(console.entries().last().unwrap().content, CLIENT_APOLOGY);
        assert_eq!(pending_count(&console), 0);
        assert_eq!(console.input(), "");
        assert!(!console.is_loading());
        console.set_input("retry");
        assert!(console.can_send());
    }

    #[tokio::test]
    async fn test_failure_flag_shows_apology() {
        let transport = ScriptedTransport::default();
        transport.push(Ok(AgentResponse::failure(
            "Unable to generate a response right now. Please retry in a moment.",
        )));
        let mut console = console(transport);

        let outcome = console.send("price?").await.unwrap();

        assert_eq!(outcome, ConsoleState::Failed);
        assert_eq!(console.entries().last().unwrap().content, CLIENT_APOLOGY);
    }

    #[tokio::test]
    async fn test_decode_failure_shows_apology() {
        let transport = ScriptedTransport::default();
        transport.push(Err(TransportError::Decode("expected value at line 1".into())));
        let mut console = console(transport);

        assert_eq!(console.send("hi").await.unwrap(), ConsoleState::Failed);
        assert_eq!(console.entries().len(), 3);
    }

    #[tokio::test]
    async fn test_error_status_shows_apology() {
        let transport = ScriptedTransport::default();
        transport.push(Err(TransportError::Status(413)));
        let mut console = console(transport);

        assert_eq!(console.send("hi").await.unwrap(), ConsoleState::Failed);
        assert_eq!(console.entries().last().unwrap().content, CLIENT_APOLOGY);
        assert!(!console.is_loading());
    }

    #[tokio::test]
    async fn test_failed_turn_is_part_of_next_history() {
        let transport = ScriptedTransport::default();
        transport.push(Err(TransportError::Http("down".into())));
        transport.push(Ok(AgentResponse::ok("back")));
        let mut console = console(transport);

        console.send("first").await.unwrap();
        console.send("second").await.unwrap();

        let last = console.transport().requests().pop().unwrap();
        assert_eq!(last.messages[2], Message::agent(CLIENT_APOLOGY));
    }

    // ---- Single in-flight guard ----

    #[test]
    fn test_second_send_while_outstanding_is_busy() {
        let mut console = console(ScriptedTransport::default());
        console.begin_send("first").unwrap();

        assert!(console.is_loading());
        console.set_input("second");
        assert!(!console.can_send());
        let err = console.begin_send("second").unwrap_err();
        assert!(matches!(err, ConsoleError::Busy));
        assert_eq!(pending_count(&console), 1);
        assert_eq!(console.entries().len(), 3);
    }

    #[test]
    fn test_placeholder_is_last_entry_while_sending() {
        let mut console = console(ScriptedTransport::default());
        let request = console.begin_send("price?").unwrap();

        assert_eq!(request.messages.len(), 2);
        let last = console.entries().last().unwrap();
        assert!(last.pending);
        assert_eq!(last.role, Role::Agent);
        assert!(!console.history().iter().any(|m| m.content.is_empty()));
    }

    #[test]
    fn test_settle_replaces_in_same_position() {
        let mut console = console(ScriptedTransport::default());
        console.begin_send("price?").unwrap();
        let position = console.entries().len() - 1;

        console.settle(Ok(AgentResponse::ok("reply"))).unwrap();

        assert_eq!(console.entries().len(), position + 1);
        assert_eq!(console.entries()[position].content, "reply");
    }

    #[test]
    fn test_settle_without_send_is_invalid() {
        let mut console = console(ScriptedTransport::default());
        let err = console.settle(Ok(AgentResponse::ok("x"))).unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::InvalidTransition(ConsoleState::Idle, ConsoleState::Settled)
        ));
    }

    #[test]
    fn test_empty_text_is_rejected_without_state_change() {
        let mut console = console(ScriptedTransport::default());
        assert!(matches!(
            console.begin_send("   ").unwrap_err(),
            ConsoleError::EmptyInput
        ));
        assert_eq!(console.state(), ConsoleState::Idle);
        assert_eq!(console.entries().len(), 1);
    }

    #[test]
    fn test_profile_locked_while_sending() {
        let mut console = console(ScriptedTransport::default());
        console.begin_send("price?").unwrap();
        assert!(matches!(
            console.set_profile(Profile::endpoint_default()),
            Err(ConsoleError::Busy)
        ));

        console.settle(Ok(AgentResponse::ok("done"))).unwrap();
        console.set_profile(Profile::endpoint_default()).unwrap();
        assert_eq!(console.profile(), &Profile::endpoint_default());
    }
}
