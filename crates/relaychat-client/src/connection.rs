//! Transport abstraction.
//!
//! The [`Transport`] trait decouples the session state machine from the wire.
//! The production implementation is [`crate::transport::WsTransport`]; tests
//! use an in-memory transport that records every call.
//!
//! # Contract
//!
//! - [`Transport::open`] is synchronous and never waits for the network. A
//!   successful return only means the connection was constructed; the
//!   handshake outcome arrives later as [`NetworkEvent::Connected`] or
//!   [`NetworkEvent::Disconnected`].
//! - A [`Connection`] delivers events in the order the transport produced
//!   them. After `Disconnected` it delivers nothing more.
//! - Dropping a [`Connection`] releases it. Nothing it had queued is
//!   delivered.

use std::future::Future;

use relaychat_proto::ClientPacket;

use crate::{ConnectConfig, ConnectionError, ConnectionId, NetworkEvent};

/// Factory for connections.
pub trait Transport: Send {
    /// Connection type produced by this transport.
    type Connection: Connection;

    /// Construct a connection for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Construction`] if the configuration cannot
    /// be turned into a connection attempt.
    fn open(&mut self, config: &ConnectConfig) -> Result<Self::Connection, ConnectionError>;
}

/// A single live transport session.
pub trait Connection: Send {
    /// Identifier assigned by the transport.
    fn id(&self) -> &ConnectionId;

    /// Queue a packet for the relay.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Emit`] if the connection can no longer send.
    fn emit(&mut self, packet: ClientPacket) -> Result<(), ConnectionError>;

    /// Ask the transport to close the connection.
    ///
    /// The connection still reports its final `Disconnected` event.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Disconnect`] if the close request cannot be
    /// delivered.
    fn close(&mut self) -> Result<(), ConnectionError>;

    /// Wait for the next event.
    ///
    /// Returns `None` once the connection has nothing more to deliver.
    fn next_event(&mut self) -> impl Future<Output = Option<NetworkEvent>> + Send;
}
