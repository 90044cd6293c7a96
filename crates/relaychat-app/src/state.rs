//! Observable UI state.
//!
//! Everything the session layer writes into the interface besides the
//! session itself: the two text fields, both banners, the roster, the message
//! log and the pending alert.

/// A line in the message log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Name the relay attached to the sender.
    pub display_name: String,
    /// Message text.
    pub text: String,
}

/// Visibility of the two inline error banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Banners {
    /// "Invalid Json Web Token" under the credential field.
    pub token_error: bool,
    /// "You are offline" under the compose field.
    pub send_error: bool,
}

/// Mutable interface state owned by [`crate::App`].
#[derive(Debug, Clone, Default)]
pub(crate) struct UiState {
    pub(crate) credential_input: String,
    pub(crate) compose_input: String,
    pub(crate) banners: Banners,
    pub(crate) roster: Vec<String>,
    pub(crate) log: Vec<LogEntry>,
    pub(crate) alert: Option<&'static str>,
}

impl UiState {
    /// Clear roster and log and hide the send-error banner.
    pub(crate) fn reset(&mut self) {
        self.roster.clear();
        self.log.clear();
        self.banners.send_error = false;
    }

    pub(crate) fn push_message(&mut self, display_name: String, text: String) {
        self.log.push(LogEntry { display_name, text });
    }
}
