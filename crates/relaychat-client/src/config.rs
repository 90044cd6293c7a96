//! Connection configuration.
//!
//! [`ClientConfig`] is the static part, set once from the command line.
//! [`ConnectConfig`] is built per connection attempt by combining it with a
//! validated [`Credential`].

use crate::Credential;

/// Relay endpoint used when none is configured.
pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:3000";

/// Header that carries the credential when none is configured.
pub const DEFAULT_AUTH_HEADER: &str = "Authorization";

const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Static client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the socket.io relay (`ws`, `wss`, `http` or `https`). The
    /// transport appends the Engine.IO endpoint path.
    pub server_url: String,
    /// Request header that carries the credential during the handshake.
    pub auth_header: String,
    /// Capacity of the per-connection inbound event queue.
    pub event_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            auth_header: DEFAULT_AUTH_HEADER.to_owned(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given relay URL with default settings.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self { server_url: server_url.into(), ..Self::default() }
    }

    /// Override the authentication header name.
    #[must_use]
    pub fn with_auth_header(mut self, header: impl Into<String>) -> Self {
        self.auth_header = header.into();
        self
    }

    /// Override the inbound event queue capacity. Values below 1 are clamped
    /// to 1.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Build the configuration for one connection attempt.
    pub fn connect_config(&self, credential: Credential) -> ConnectConfig {
        ConnectConfig {
            server_url: self.server_url.clone(),
            auth_header: self.auth_header.clone(),
            credential,
            event_capacity: self.event_capacity.max(1),
        }
    }
}

/// Configuration for a single connection attempt.
///
/// The credential is sent once, as a request header value at connection
/// establishment. There is no refresh or re-authentication mid-session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectConfig {
    /// Base URL of the relay.
    pub server_url: String,
    /// Header name for the credential.
    pub auth_header: String,
    /// Validated credential.
    pub credential: Credential,
    /// Capacity of the inbound event queue.
    pub event_capacity: usize,
}
