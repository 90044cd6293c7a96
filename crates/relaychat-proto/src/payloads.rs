//! Packet payloads.
//!
//! Field names follow the relay's JSON conventions, so Rust names are mapped
//! with `serde(rename)` where they differ.

use serde::{Deserialize, Serialize};

/// Chat line broadcast by the relay (`message-from-server`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    /// Display name of the author, resolved by the relay from its credential.
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// Message text.
    pub message: String,
}

/// Chat line submitted by a client (`message-form-client`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMessage {
    /// Connection id of the sender.
    pub id: String,
    /// Message text as typed.
    pub message: String,
}
