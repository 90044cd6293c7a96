//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the runtime from a specific frontend. Each
//! frontend reports user intents as [`AppEvent`]s and renders [`View`]s; the
//! generic [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{AppEvent, View};

/// Abstracts user-facing I/O for the application runtime.
///
/// # Implementations
///
/// - **TUI**: crossterm key events, ratatui rendering
/// - **Simulation**: scripted events, captured views
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next user intent.
    ///
    /// Returns `None` if input arrived that produced no event (e.g. an
    /// unbound key or a resize).
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Render the view.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, view: &View) -> Result<(), Self::Error>;

    /// Stop the driver and clean up resources.
    fn stop(&mut self);
}
