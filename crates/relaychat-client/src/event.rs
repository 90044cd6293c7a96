//! Events delivered by a live connection.

use std::fmt;

use relaychat_proto::{ServerMessage, ServerPacket};

/// Identifies one listener set.
///
/// A fresh id is assigned every time a connection is attached. Events are
/// tagged with the id of the listener set that received them, so anything
/// arriving through a detached set can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Id handed out for the first attachment.
    pub const FIRST: Self = Self(1);

    /// Id for the attachment after this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Raw value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Transport-assigned identifier of a connection.
///
/// Sent as the sender id of outbound chat lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Wrap a transport id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a connection ended.
///
/// Informational only: a rejected credential and a network failure look the
/// same to the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectReason {
    /// Closed at the client's request.
    ClientClosed,
    /// Relay closed the stream.
    ServerClosed,
    /// Handshake was refused or never completed.
    HandshakeFailed(String),
    /// Stream failed after the handshake.
    TransportError(String),
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientClosed => f.write_str("closed by client"),
            Self::ServerClosed => f.write_str("closed by server"),
            Self::HandshakeFailed(reason) => write!(f, "handshake failed: {reason}"),
            Self::TransportError(reason) => write!(f, "transport error: {reason}"),
        }
    }
}

/// Event delivered by a connection, in the order the transport produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkEvent {
    /// Handshake completed.
    Connected,

    /// Connection ended. No further events follow.
    Disconnected {
        /// Why it ended.
        reason: DisconnectReason,
    },

    /// Relay pushed a new roster. Replaces the previous one.
    ClientsUpdated(Vec<String>),

    /// Relay delivered a chat line.
    MessageReceived(ServerMessage),
}

impl From<ServerPacket> for NetworkEvent {
    fn from(packet: ServerPacket) -> Self {
        match packet {
            ServerPacket::ClientsUpdated(ids) => Self::ClientsUpdated(ids),
            ServerPacket::MessageFromServer(message) => Self::MessageReceived(message),
        }
    }
}
