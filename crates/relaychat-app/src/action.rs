//! Application side-effects.
//!
//! Instructions produced by the [`crate::App`] state machine for the runtime
//! to execute. Network side-effects are performed by the App itself through
//! its connection manager, so only presentation is left here.

/// Actions produced by the App state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,
}
