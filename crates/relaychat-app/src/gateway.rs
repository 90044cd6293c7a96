//! Outbound message gating.
//!
//! Decides what happens to composed text. Inbound messages do not pass
//! through here: they are rendered regardless of the session state.

use relaychat_client::{ClientMessage, ClientPacket, ConnectionId};

use crate::SessionState;

/// Outcome of submitting composed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Text was empty after trimming; nothing happens.
    Ignored,
    /// Session is Offline; show the send-error banner and drop the text.
    RejectedOffline,
    /// Emit this packet.
    Send(ClientPacket),
}

/// Decide what to do with `raw` given the session and the sender's
/// connection id.
///
/// The text is sent exactly as typed. Trimming only decides emptiness.
pub fn submit(raw: &str, session: SessionState, sender: Option<&ConnectionId>) -> Submission {
    if raw.trim().is_empty() {
        return Submission::Ignored;
    }

    match (session, sender) {
        (SessionState::Online, Some(id)) => Submission::Send(ClientPacket::MessageFromClient(
            ClientMessage { id: id.to_string(), message: raw.to_owned() },
        )),
        _ => Submission::RejectedOffline,
    }
}
