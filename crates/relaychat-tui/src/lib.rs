//! Terminal UI for RelayChat
//!
//! A thin shell over [`relaychat_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`relaychat_app::Runtime`].
//!
//! This crate only handles key translation and rendering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod input;
pub mod terminal;
pub mod ui;

pub use input::{Focus, InputState, KeyInput, KeyOutcome};
pub use relaychat_app::{App, AppAction, AppEvent, Driver, Runtime, View};
pub use terminal::{TerminalDriver, TerminalError};
