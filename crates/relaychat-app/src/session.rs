//! Session state.
//!
//! The single Online/Offline value that gates sending and drives the button
//! and status projections. Only the [`crate::ConnectionManager`] can change
//! it; everyone else gets a copy.

use std::fmt;

/// Online/Offline flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No live, handshaken connection.
    #[default]
    Offline,
    /// Connected to the relay.
    Online,
}

impl SessionState {
    /// Status label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Self::Offline => "Offline",
            Self::Online => "Online",
        }
    }

    /// True when Online.
    pub fn is_online(self) -> bool {
        self == Self::Online
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Holder of the current [`SessionState`].
///
/// Transitions are crate-private so that UI code can read but never write.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// Create an Offline session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Transition to Online. Returns `true` if the state changed.
    pub(crate) fn go_online(&mut self) -> bool {
        self.set(SessionState::Online)
    }

    /// Transition to Offline. Returns `true` if the state changed.
    pub(crate) fn go_offline(&mut self) -> bool {
        self.set(SessionState::Offline)
    }

    fn set(&mut self, next: SessionState) -> bool {
        if self.state == next {
            return false;
        }
        tracing::debug!(from = %self.state, to = %next, "session transition");
        self.state = next;
        true
    }
}
