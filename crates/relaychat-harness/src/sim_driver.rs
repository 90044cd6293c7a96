//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` plays a script of user intents and records every rendered
//! [`View`]. It implements [`Driver`] so the same [`relaychat_app::Runtime`]
//! orchestration code runs in both production and simulation.
//!
//! Clones share state: keep one to inject events and inspect renders while
//! the runtime owns the other. Once the script is exhausted the driver
//! reports `Quit`, so a runtime driven by it always terminates.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use relaychat_app::{App, AppEvent, Driver, View};
use relaychat_client::Transport;

use crate::invariants::{InvariantRegistry, SessionSnapshot};

/// Error type for simulation driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

#[derive(Debug, Default)]
struct SharedState {
    pending_events: VecDeque<AppEvent>,
    renders: Vec<View>,
    fail_render: bool,
    stopped: bool,
}

/// Simulation driver for deterministic testing.
#[derive(Clone, Default)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    invariants: Option<Arc<InvariantRegistry>>,
}

impl SimDriver {
    /// Create a driver with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a driver that plays `events` in order.
    pub fn scripted(events: impl IntoIterator<Item = AppEvent>) -> Self {
        let driver = Self::new();
        driver.inject_events(events);
        driver
    }

    /// Enable invariant checking in [`SimDriver::check_invariants`].
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Arc::new(registry));
        self
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an event to the script.
    pub fn inject_event(&self, event: AppEvent) {
        self.lock().pending_events.push_back(event);
    }

    /// Append events to the script.
    pub fn inject_events(&self, events: impl IntoIterator<Item = AppEvent>) {
        self.lock().pending_events.extend(events);
    }

    /// Check if there are scripted events left.
    pub fn has_pending(&self) -> bool {
        !self.lock().pending_events.is_empty()
    }

    /// Make the next render fail.
    pub fn fail_next_render(&self) {
        self.lock().fail_render = true;
    }

    /// Every view rendered so far.
    pub fn renders(&self) -> Vec<View> {
        self.lock().renders.clone()
    }

    /// Most recently rendered view.
    pub fn last_render(&self) -> Option<View> {
        self.lock().renders.last().cloned()
    }

    /// Whether the runtime stopped the driver.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }

    /// Check the registered invariants against `app`, panicking on
    /// violation.
    pub fn check_invariants<T: Transport>(&self, app: &App<T>, context: &str) {
        if let Some(registry) = &self.invariants {
            registry.assert_all(&SessionSnapshot::from_app(app), context);
        }
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        let next = self.lock().pending_events.pop_front();
        Ok(Some(next.unwrap_or(AppEvent::Quit)))
    }

    fn render(&mut self, view: &View) -> Result<(), Self::Error> {
        let mut state = self.lock();
        if std::mem::take(&mut state.fail_render) {
            return Err(SimDriverError("injected render failure".into()));
        }
        state.renders.push(view.clone());
        Ok(())
    }

    fn stop(&mut self) {
        self.lock().stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inject_event_queues_event() {
        let driver = SimDriver::new();
        driver.inject_event(AppEvent::ConnectPressed);

        assert!(driver.has_pending());
    }

    #[test]
    fn clones_share_renders() {
        let driver = SimDriver::new();
        let mut runtime_side = driver.clone();
        let app = App::new(crate::SimTransport::new(), relaychat_client::ClientConfig::default());

        assert!(runtime_side.render(&app.view()).is_ok());

        assert_eq!(driver.renders().len(), 1);
        assert_eq!(driver.last_render(), Some(app.view()));
    }
}
