//! Application layer for RelayChat
//!
//! The connection/session state machine and everything that keeps the user
//! interface consistent with it, independent of any rendering toolkit.
//!
//! # Components
//!
//! - [`App`]: UI state machine (input fields, banners, roster, message log)
//! - [`ConnectionManager`]: owns the single connection and the session state
//! - [`gateway`]: outbound message gating
//! - [`View`]: pure projection of the App onto a render description
//! - [`Driver`]: trait for platform-specific input and rendering
//! - [`Runtime`]: generic event loop joining a Driver and a Transport

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
pub mod gateway;
mod manager;
mod runtime;
mod session;
mod state;
#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod testing;
mod view;

pub use action::AppAction;
pub use app::App;
pub use driver::Driver;
pub use event::AppEvent;
pub use gateway::Submission;
pub use manager::{ConnectionManager, Transition};
pub use relaychat_client::{
    ClientConfig, ConnectionError, ConnectionId, Credential, ListenerId, NetworkEvent,
    ValidationError,
};
pub use runtime::Runtime;
pub use session::{Session, SessionState};
pub use state::{Banners, LogEntry};
pub use view::{
    BannerKind, BannerView, ButtonsView, EMPTY_CREDENTIAL_ALERT, SEND_ERROR_TEXT, StatusView,
    TOKEN_ERROR_TEXT, Tone, View, reflect_banner, reflect_buttons, reflect_status,
};
