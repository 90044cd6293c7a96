//! Wire protocol for RelayChat
//!
//! The relay is a socket.io server speaking a small named-event protocol.
//! Every event is a JSON array `[event, payload]`, carried inside Engine.IO /
//! socket.io framing on a WebSocket text frame. This crate owns the event
//! names, the payload shapes and the codecs for both layers.
//!
//! # Components
//!
//! - [`ServerFrame`] / [`ClientFrame`]: Engine.IO and socket.io framing,
//!   including the heartbeat and namespace join
//! - [`ServerPacket`]: events the relay pushes to clients
//! - [`ClientPacket`]: events a client sends to the relay
//! - [`payloads`]: payload structs shared by both directions

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
pub mod frame;
pub mod packet;
pub mod payloads;

pub use errors::{ProtocolError, Result};
pub use frame::{
    ClientFrame, ENGINE_IO_VERSION, OpenHandshake, SOCKET_IO_PATH, ServerFrame, SocketPacket,
};
pub use packet::{ClientPacket, MAX_PACKET_SIZE, ServerPacket, event};
pub use payloads::{ClientMessage, ServerMessage};
