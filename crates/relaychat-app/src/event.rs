//! Application input events.
//!
//! Events originate from two sources:
//! - User intents reported by the frontend (field edits, button presses).
//! - Network events delivered through the attached listener set.

use relaychat_client::{ListenerId, NetworkEvent};

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Credential field now holds this text.
    CredentialEdited(String),

    /// Compose field now holds this text.
    ComposeEdited(String),

    /// Connect button pressed.
    ConnectPressed,

    /// Disconnect button pressed.
    DisconnectPressed,

    /// Compose form submitted.
    Submit,

    /// Pending alert acknowledged.
    DismissAlert,

    /// Quit the application.
    Quit,

    /// Event from a connection.
    Network {
        /// Listener set the event was delivered through.
        listener: ListenerId,
        /// The event.
        event: NetworkEvent,
    },
}
