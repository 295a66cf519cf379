//! Per-turn console state machine.
//!
//! - Idle -> Sending (user submits or picks a suggested prompt)
//! - Sending -> Settled (reply received)
//! - Sending -> Failed (transport error or failure flag)
//! - Settled -> Idle, Failed -> Idle (final step, always taken)

use std::fmt;

/// Where the console is in the lifecycle of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConsoleState {
    /// Awaiting input; sending allowed.
    #[default]
    Idle,
    /// A request is outstanding; sending disabled.
    Sending,
    /// The placeholder was replaced by the reply.
    Settled,
    /// The placeholder was replaced by the apology.
    Failed,
}

impl fmt::Display for ConsoleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleState::Idle => write!(f, "idle"),
            ConsoleState::Sending => write!(f, "sending"),
            ConsoleState::Settled => write!(f, "settled"),
            ConsoleState::Failed => write!(f, "failed"),
        }
    }
}

impl ConsoleState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &ConsoleState) -> bool {
        matches!(
            (self, target),
            (ConsoleState::Idle, ConsoleState::Sending)
                | (ConsoleState::Sending, ConsoleState::Settled)
                | (ConsoleState::Sending, ConsoleState::Failed)
                | (ConsoleState::Settled, ConsoleState::Idle)
                | (ConsoleState::Failed, ConsoleState::Idle)
        )
    }
}
