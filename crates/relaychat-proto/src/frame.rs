//! Engine.IO v4 / socket.io v5 framing.
//!
//! The relay is a socket.io server. Every WebSocket text frame is an
//! Engine.IO packet: one type digit followed by its data. socket.io packets
//! ride inside Engine.IO `message` packets, again behind a type digit, and
//! event packets carry the `[event, payload]` array handled by
//! [`ServerPacket`] / [`ClientPacket`].
//!
//! ```text
//! 0{"sid":"..","pingInterval":25000,"pingTimeout":20000}   open
//! 2 / 3                                                    ping / pong
//! 40 / 40{"sid":".."}                                      join / joined
//! 44{"message":".."}                                       join refused
//! 42["clients-updated",["alice","bob"]]                    event
//! 41                                                       leave
//! ```
//!
//! Only the default namespace is used and no acknowledgements are requested,
//! so ack and binary packets from the relay are rejected.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    ClientPacket, MAX_PACKET_SIZE, ServerPacket,
    errors::{ProtocolError, Result},
};

/// Engine.IO protocol revision, sent as the `EIO` query parameter.
pub const ENGINE_IO_VERSION: u8 = 4;

/// Default socket.io endpoint path on the relay.
pub const SOCKET_IO_PATH: &str = "/socket.io/";

/// Parameters the relay announces in its Engine.IO `open` packet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenHandshake {
    /// Engine.IO session id.
    pub sid: String,
    /// Transports the session could upgrade to.
    #[serde(default)]
    pub upgrades: Vec<String>,
    /// Milliseconds between relay pings.
    pub ping_interval: u64,
    /// Milliseconds the relay waits for a pong.
    pub ping_timeout: u64,
    /// Largest payload the relay accepts, if announced.
    #[serde(default)]
    pub max_payload: Option<u64>,
}

impl OpenHandshake {
    /// How long the client may go without a ping before the relay counts as
    /// gone.
    pub fn liveness_window(&self) -> Duration {
        Duration::from_millis(self.ping_interval.saturating_add(self.ping_timeout))
    }
}

/// socket.io packet received from the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketPacket {
    /// Namespace joined. Carries the socket id assigned by the relay.
    Connect {
        /// socket.io session id, used as the client's connection id.
        sid: Option<String>,
    },
    /// Relay removed the client from the namespace.
    Disconnect,
    /// Named event.
    Event(ServerPacket),
    /// Relay refused the join, typically because the credential was rejected.
    ConnectError(String),
}

/// Engine.IO packet received from the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerFrame {
    /// Session opened.
    Open(OpenHandshake),
    /// Session closed.
    Close,
    /// Heartbeat; must be answered with [`ClientFrame::Pong`].
    Ping,
    /// Heartbeat reply.
    Pong,
    /// socket.io packet.
    Message(SocketPacket),
    /// Transport upgrade.
    Upgrade,
    /// Filler.
    Noop,
}

impl ServerFrame {
    /// Decode a text frame.
    pub fn decode(text: &str) -> Result<Self> {
        if text.len() > MAX_PACKET_SIZE {
            return Err(ProtocolError::PacketTooLarge { size: text.len(), max: MAX_PACKET_SIZE });
        }

        let (kind, data) = split_type(text)?;
        match kind {
            '0' => serde_json::from_str(data)
                .map(Self::Open)
                .map_err(|e| ProtocolError::InvalidHandshake(e.to_string())),
            '1' => Ok(Self::Close),
            '2' => Ok(Self::Ping),
            '3' => Ok(Self::Pong),
            '4' => SocketPacket::decode(data).map(Self::Message),
            '5' => Ok(Self::Upgrade),
            '6' => Ok(Self::Noop),
            other => Err(ProtocolError::UnknownFrameType(other)),
        }
    }
}

impl SocketPacket {
    fn decode(text: &str) -> Result<Self> {
        let (kind, data) = split_type(text)?;
        let data = strip_namespace(data)?;

        match kind {
            '0' => Ok(Self::Connect { sid: connect_sid(data) }),
            '1' => Ok(Self::Disconnect),
            '2' => {
                let body = data.trim_start_matches(|c: char| c.is_ascii_digit());
                ServerPacket::decode(body).map(Self::Event)
            },
            '4' => Ok(Self::ConnectError(connect_error_message(data))),
            '3' => Err(ProtocolError::UnsupportedPacket("ack")),
            '5' => Err(ProtocolError::UnsupportedPacket("binary event")),
            '6' => Err(ProtocolError::UnsupportedPacket("binary ack")),
            other => Err(ProtocolError::UnknownPacketType(other)),
        }
    }
}

/// Engine.IO packet sent by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientFrame {
    /// Join the default namespace.
    Connect,
    /// Leave the default namespace.
    Disconnect,
    /// Heartbeat reply.
    Pong,
    /// Named event.
    Event(ClientPacket),
}

impl ClientFrame {
    /// Encode into a text frame.
    pub fn encode(&self) -> Result<String> {
        match self {
            Self::Connect => Ok("40".to_owned()),
            Self::Disconnect => Ok("41".to_owned()),
            Self::Pong => Ok("3".to_owned()),
            Self::Event(packet) => packet.encode().map(|body| format!("42{body}")),
        }
    }
}

fn split_type(text: &str) -> Result<(char, &str)> {
    let mut chars = text.chars();
    let Some(kind) = chars.next() else {
        return Err(ProtocolError::Malformed("missing packet type".into()));
    };
    Ok((kind, chars.as_str()))
}

/// Strip a `/nsp,` prefix. Anything but the default namespace is rejected.
fn strip_namespace(data: &str) -> Result<&str> {
    if !data.starts_with('/') {
        return Ok(data);
    }

    let (namespace, rest) = data.split_once(',').unwrap_or((data, ""));
    if namespace == "/" {
        Ok(rest)
    } else {
        Err(ProtocolError::ForeignNamespace(namespace.to_owned()))
    }
}

fn connect_sid(data: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ConnectAck {
        sid: String,
    }

    serde_json::from_str::<ConnectAck>(data).ok().map(|ack| ack.sid)
}

fn connect_error_message(data: &str) -> String {
    match serde_json::from_str::<Value>(data) {
        Ok(Value::Object(fields)) => match fields.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => data.to_owned(),
        },
        Ok(Value::String(message)) => message,
        _ => data.to_owned(),
    }
}
