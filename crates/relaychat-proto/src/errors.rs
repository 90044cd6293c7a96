//! Protocol errors.

use thiserror::Error;

/// Convenience alias for protocol results.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while decoding or encoding packets.
///
/// None of these are fatal to a session: the transport logs and skips a packet
/// that fails to decode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame is not a `[event, payload]` JSON array, or has no type digit.
    #[error("malformed packet: {0}")]
    Malformed(String),

    /// Engine.IO packet type is not one of `0`..`6`.
    #[error("unknown frame type: {0:?}")]
    UnknownFrameType(char),

    /// socket.io packet type is not one of `0`..`6`.
    #[error("unknown packet type: {0:?}")]
    UnknownPacketType(char),

    /// socket.io packet type the client never asks for.
    #[error("unsupported packet: {0}")]
    UnsupportedPacket(&'static str),

    /// Packet addressed to a namespace other than `/`.
    #[error("packet for foreign namespace {0}")]
    ForeignNamespace(String),

    /// Engine.IO `open` payload could not be parsed.
    #[error("invalid open handshake: {0}")]
    InvalidHandshake(String),

    /// Frame exceeds [`crate::MAX_PACKET_SIZE`].
    #[error("packet too large: {size} bytes (max {max})")]
    PacketTooLarge {
        /// Size of the rejected frame.
        size: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Event name is not part of the protocol for this direction.
    #[error("unknown event: {0}")]
    UnknownEvent(String),

    /// Event name is known but the payload does not match its shape.
    #[error("invalid payload for {event}: {reason}")]
    InvalidPayload {
        /// Event whose payload was rejected.
        event: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// Payload could not be serialized.
    #[error("failed to encode {event}: {reason}")]
    Encode {
        /// Event being encoded.
        event: &'static str,
        /// Encoder message.
        reason: String,
    },
}
