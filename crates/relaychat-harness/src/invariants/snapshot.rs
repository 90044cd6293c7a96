//! Observable state snapshots for invariant checking.

use relaychat_app::{App, SessionState, View};
use relaychat_client::{ListenerId, Transport};

/// What an invariant can observe about one app at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Session state.
    pub session: SessionState,
    /// Rendered projection.
    pub view: View,
    /// Attached listener set.
    pub listener: Option<ListenerId>,
    /// A close has been requested and not yet acknowledged.
    pub closing: bool,
    /// A connection id is available for outbound messages.
    pub has_connection_id: bool,
}

impl SessionSnapshot {
    /// Capture the current state of `app`.
    pub fn from_app<T: Transport>(app: &App<T>) -> Self {
        Self {
            session: app.session_state(),
            view: app.view(),
            listener: app.listener(),
            closing: app.manager().is_closing(),
            has_connection_id: app.connection_id().is_some(),
        }
    }
}
