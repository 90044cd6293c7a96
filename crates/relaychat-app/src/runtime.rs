//! Generic runtime for application orchestration.
//!
//! The Runtime drives the event loop, joining:
//! - [`App`]: UI state machine and, through it, the attached connection
//! - [`Driver`]: Platform-specific input and rendering
//!
//! Each event is processed to completion before the next is awaited, so
//! events from one source are never reordered or batched.

use relaychat_client::Transport;

use crate::{App, AppAction, Driver};

/// Generic runtime that orchestrates App and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `T`: Transport used for connections
pub struct Runtime<D, T>
where
    D: Driver,
    T: Transport,
{
    driver: D,
    app: App<T>,
}

impl<D, T> Runtime<D, T>
where
    D: Driver,
    T: Transport,
{
    /// Create a new runtime.
    pub fn new(driver: D, app: App<T>) -> Self {
        Self { driver, app }
    }

    /// Run the event loop until the app asks to quit.
    ///
    /// Network events take priority over user input when both are ready, so
    /// a handshake already received is applied before the next intent.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to poll or render.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app.view())?;

        loop {
            let event = tokio::select! {
                biased;

                event = self.app.next_network_event() => Some(event),
                input = self.driver.poll_event() => input?,
            };

            let Some(event) = event else {
                continue;
            };

            let actions = self.app.handle(event);
            if self.process_actions(actions)? {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Execute actions. Returns `true` if the application should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app.view())?,
                AppAction::Quit => return Ok(true),
            }
        }
        Ok(false)
    }

    /// Application state.
    pub fn app(&self) -> &App<T> {
        &self.app
    }

    /// Mutable application state.
    pub fn app_mut(&mut self) -> &mut App<T> {
        &mut self.app
    }

    /// The driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Consume the runtime, returning its parts.
    pub fn into_parts(self) -> (D, App<T>) {
        (self.driver, self.app)
    }
}
