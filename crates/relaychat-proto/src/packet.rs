//! Named-event packets.
//!
//! A packet is a JSON array of exactly two elements: the event name and its
//! payload. On the wire it travels as the body of a socket.io event packet
//! (see [`crate::frame`]). Each direction has its own closed set of events, so
//! a client never accepts a client-bound name and vice versa.
//!
//! # Invariants
//!
//! - Each packet variant maps to exactly one event name (enforced by match
//!   exhaustiveness in `event_name()`).
//! - Decoding checks the frame size before parsing.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    errors::{ProtocolError, Result},
    payloads::{ClientMessage, ServerMessage},
};

/// Largest text frame accepted by the decoder (1 MiB).
pub const MAX_PACKET_SIZE: usize = 1024 * 1024;

/// Event names used on the wire.
pub mod event {
    /// Relay pushes the full list of connected client ids.
    pub const CLIENTS_UPDATED: &str = "clients-updated";
    /// Relay broadcasts a chat line.
    pub const MESSAGE_FROM_SERVER: &str = "message-from-server";
    /// Client submits a chat line. The spelling is the relay's.
    pub const MESSAGE_FROM_CLIENT: &str = "message-form-client";
}

/// Packets pushed by the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerPacket {
    /// Complete, ordered roster of connected client ids.
    ClientsUpdated(Vec<String>),
    /// Chat line from any connected client.
    MessageFromServer(ServerMessage),
}

impl ServerPacket {
    /// Wire name of this packet's event.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::ClientsUpdated(_) => event::CLIENTS_UPDATED,
            Self::MessageFromServer(_) => event::MESSAGE_FROM_SERVER,
        }
    }

    /// Decode a text frame.
    pub fn decode(text: &str) -> Result<Self> {
        let (name, payload) = split_packet(text)?;
        match name.as_str() {
            event::CLIENTS_UPDATED => {
                payload_as(event::CLIENTS_UPDATED, payload).map(Self::ClientsUpdated)
            },
            event::MESSAGE_FROM_SERVER => {
                payload_as(event::MESSAGE_FROM_SERVER, payload).map(Self::MessageFromServer)
            },
            _ => Err(ProtocolError::UnknownEvent(name)),
        }
    }

    /// Encode into a text frame.
    pub fn encode(&self) -> Result<String> {
        match self {
            Self::ClientsUpdated(ids) => join_packet(self.event_name(), ids),
            Self::MessageFromServer(msg) => join_packet(self.event_name(), msg),
        }
    }
}

/// Packets sent by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientPacket {
    /// Chat line to broadcast.
    MessageFromClient(ClientMessage),
}

impl ClientPacket {
    /// Wire name of this packet's event.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::MessageFromClient(_) => event::MESSAGE_FROM_CLIENT,
        }
    }

    /// Decode a text frame.
    pub fn decode(text: &str) -> Result<Self> {
        let (name, payload) = split_packet(text)?;
        match name.as_str() {
            event::MESSAGE_FROM_CLIENT => {
                payload_as(event::MESSAGE_FROM_CLIENT, payload).map(Self::MessageFromClient)
            },
            _ => Err(ProtocolError::UnknownEvent(name)),
        }
    }

    /// Encode into a text frame.
    pub fn encode(&self) -> Result<String> {
        match self {
            Self::MessageFromClient(msg) => join_packet(self.event_name(), msg),
        }
    }
}

fn split_packet(text: &str) -> Result<(String, Value)> {
    if text.len() > MAX_PACKET_SIZE {
        return Err(ProtocolError::PacketTooLarge { size: text.len(), max: MAX_PACKET_SIZE });
    }

    serde_json::from_str::<(String, Value)>(text).map_err(|e| ProtocolError::Malformed(e.to_string()))
}

fn payload_as<T: DeserializeOwned>(event: &'static str, payload: Value) -> Result<T> {
    serde_json::from_value(payload)
        .map_err(|e| ProtocolError::InvalidPayload { event, reason: e.to_string() })
}

fn join_packet<T: Serialize>(event: &'static str, payload: &T) -> Result<String> {
    serde_json::to_string(&(event, payload))
        .map_err(|e| ProtocolError::Encode { event, reason: e.to_string() })
}
