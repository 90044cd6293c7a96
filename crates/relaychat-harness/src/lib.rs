//! Simulation harness for RelayChat.
//!
//! In-memory implementations of the [`relaychat_client::Transport`] and
//! [`relaychat_app::Driver`] traits, so the same [`relaychat_app::App`] and
//! [`relaychat_app::Runtime`] code that runs in the terminal can run in
//! tests without a network or a terminal.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks properties that must hold after every
//! transition. Use [`InvariantRegistry::standard()`] for the session/UI
//! consistency rules.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod scenario;
pub mod sim_driver;
pub mod sim_transport;

pub use invariants::{
    ButtonsExclusive, HiddenBannerHasNoText, Invariant, InvariantRegistry, InvariantResult,
    OnlineRequiresLiveConnection, SessionSnapshot, StatusMatchesSession, Violation,
};
pub use scenario::deliver_queued;
pub use sim_driver::{SimDriver, SimDriverError};
pub use sim_transport::{SimConnection, SimTransport};
