//! Connection errors.
//!
//! These are all raised at the network boundary. The session layer catches
//! and logs them; none of them is allowed to leave the UI in a half-torn-down
//! state.

use thiserror::Error;

/// Errors raised by a [`crate::Transport`] or [`crate::Connection`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// Connection could not be constructed (bad URL, bad header value, no
    /// async runtime).
    #[error("failed to construct connection: {0}")]
    Construction(String),

    /// Closing the connection failed.
    #[error("failed to close connection: {0}")]
    Disconnect(String),

    /// Outbound packet could not be handed to the transport.
    #[error("failed to emit {event}: {reason}")]
    Emit {
        /// Event name of the packet.
        event: &'static str,
        /// Underlying failure.
        reason: String,
    },
}
