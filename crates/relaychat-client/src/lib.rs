//! Client connection layer
//!
//! Everything between the session state machine and the wire: validating the
//! credential, building the connection configuration that carries it, the
//! events a live connection reports, and the [`Transport`]/[`Connection`]
//! traits that hide the concrete transport.
//!
//! # Components
//!
//! - [`Credential`]: validated, non-empty authentication token
//! - [`ClientConfig`] / [`ConnectConfig`]: connection configuration
//! - [`NetworkEvent`]: lifecycle and relay events delivered by a connection
//! - [`Transport`] / [`Connection`]: transport abstraction
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::WsTransport`]: socket.io transport over tokio-tungstenite

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod connection;
mod credential;
mod error;
mod event;

#[cfg(feature = "transport")]
pub mod transport;

pub use config::{ClientConfig, ConnectConfig, DEFAULT_AUTH_HEADER, DEFAULT_SERVER_URL};
pub use connection::{Connection, Transport};
pub use credential::{Credential, ValidationError, validate};
pub use error::ConnectionError;
pub use event::{ConnectionId, DisconnectReason, ListenerId, NetworkEvent};
pub use relaychat_proto::{ClientMessage, ClientPacket, ServerMessage, ServerPacket};
