//! Application state machine.
//!
//! [`App`] consumes [`AppEvent`]s and produces [`AppAction`]s. It owns the
//! [`ConnectionManager`] (and through it the session) together with the
//! interface state the session drives: input fields, banners, roster and
//! message log.
//!
//! # Responsibilities
//!
//! - Blocks connection attempts with a blank credential and raises the alert.
//! - Applies network transitions to the interface state.
//! - Gates outbound messages through [`gateway::submit`].
//! - Swallows connection errors after logging, keeping the latest in
//!   [`App::last_failure`].

use relaychat_client::{
    ClientConfig, ConnectionError, ConnectionId, ListenerId, NetworkEvent, Transport, validate,
};

use crate::{
    AppAction, AppEvent, Banners, ConnectionManager, LogEntry, SessionState, Submission,
    Transition, View, gateway, reflect_buttons, state::UiState, view::EMPTY_CREDENTIAL_ALERT,
};

/// Application state machine.
///
/// No I/O of its own beyond the non-blocking calls into the transport, so it
/// is fully testable with an in-memory transport.
#[derive(Debug)]
pub struct App<T: Transport> {
    manager: ConnectionManager<T>,
    ui: UiState,
    last_failure: Option<ConnectionError>,
}

impl<T: Transport> App<T> {
    /// Create an Offline app.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            manager: ConnectionManager::new(transport, config),
            ui: UiState::default(),
            last_failure: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::CredentialEdited(text) => {
                self.ui.credential_input = text;
                vec![AppAction::Render]
            },
            AppEvent::ComposeEdited(text) => {
                self.ui.compose_input = text;
                vec![AppAction::Render]
            },
            AppEvent::ConnectPressed => {
                if !reflect_buttons(self.session_state()).connect_enabled {
                    tracing::debug!("connect pressed while disabled");
                    return vec![];
                }
                self.connect()
            },
            AppEvent::DisconnectPressed => {
                if !reflect_buttons(self.session_state()).disconnect_enabled {
                    tracing::debug!("disconnect pressed while disabled");
                    return vec![];
                }
                self.disconnect()
            },
            AppEvent::Submit => self.submit(),
            AppEvent::DismissAlert => {
                if self.ui.alert.take().is_some() {
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
            AppEvent::Quit => vec![AppAction::Quit],
            AppEvent::Network { listener, event } => self.apply_network(listener, event),
        }
    }

    /// Start a connection with the credential field's contents.
    ///
    /// A blank credential raises the alert and never reaches the transport.
    /// Otherwise control returns immediately; the session goes Online when
    /// the handshake event arrives.
    pub fn connect(&mut self) -> Vec<AppAction> {
        let credential = match validate(&self.ui.credential_input) {
            Ok(credential) => credential,
            Err(e) => {
                tracing::debug!(error = %e, "connect blocked");
                self.ui.alert = Some(EMPTY_CREDENTIAL_ALERT);
                return vec![AppAction::Render];
            },
        };

        let was_online = self.session_state().is_online();
        match self.manager.connect(credential) {
            Ok(listener) => {
                tracing::debug!(%listener, "connecting");
                self.last_failure = None;
            },
            Err(e) => self.last_failure = Some(e),
        }
        if was_online && !self.session_state().is_online() {
            self.ui.reset();
        }

        vec![AppAction::Render]
    }

    /// Close the connection, if any, and reset the interface.
    ///
    /// Idempotent. The credential field is cleared only when a close was
    /// actually requested.
    pub fn disconnect(&mut self) -> Vec<AppAction> {
        match self.manager.disconnect() {
            Ok(Some(listener)) => {
                tracing::debug!(%listener, "disconnecting");
                self.ui.credential_input.clear();
            },
            Ok(None) => {},
            Err(e) => self.last_failure = Some(e),
        }

        self.ui.reset();
        self.ui.banners.token_error = false;
        vec![AppAction::Render]
    }

    /// Submit the compose field's contents.
    pub fn submit(&mut self) -> Vec<AppAction> {
        let submission = gateway::submit(
            &self.ui.compose_input,
            self.manager.session(),
            self.manager.connection_id(),
        );

        match submission {
            Submission::Ignored => vec![],
            Submission::RejectedOffline => {
                self.ui.banners.send_error = true;
                self.ui.compose_input.clear();
                vec![AppAction::Render]
            },
            Submission::Send(packet) => {
                if let Err(e) = self.manager.emit(packet) {
                    self.last_failure = Some(e);
                }
                self.ui.compose_input.clear();
                vec![AppAction::Render]
            },
        }
    }

    fn apply_network(&mut self, listener: ListenerId, event: NetworkEvent) -> Vec<AppAction> {
        let Some(transition) = self.manager.apply(listener, event) else {
            return vec![];
        };

        match transition {
            Transition::WentOnline => {
                self.ui.banners.token_error = false;
                self.ui.banners.send_error = false;
            },
            Transition::WentOffline { user_requested } => {
                self.ui.reset();
                self.ui.banners.token_error = !user_requested;
            },
            Transition::RosterReplaced(ids) => self.ui.roster = ids,
            Transition::MessageArrived(message) => {
                self.ui.push_message(message.full_name, message.message);
            },
        }
        vec![AppAction::Render]
    }

    /// Wait for the next event from the attached listener set.
    ///
    /// Never resolves while no connection is held.
    pub async fn next_network_event(&mut self) -> AppEvent {
        let (listener, event) = self.manager.next_event().await;
        AppEvent::Network { listener, event }
    }

    /// Render description of the current state.
    pub fn view(&self) -> View {
        View::project(self)
    }

    /// Current session state.
    pub fn session_state(&self) -> SessionState {
        self.manager.session()
    }

    /// Attached listener set, if any.
    pub fn listener(&self) -> Option<ListenerId> {
        self.manager.attached_listener()
    }

    /// Id of the held connection, if any.
    pub fn connection_id(&self) -> Option<&ConnectionId> {
        self.manager.connection_id()
    }

    /// Most recent swallowed connection error since the last successful
    /// connect.
    pub fn last_failure(&self) -> Option<&ConnectionError> {
        self.last_failure.as_ref()
    }

    /// Connection manager.
    pub fn manager(&self) -> &ConnectionManager<T> {
        &self.manager
    }

    /// Credential field contents.
    pub fn credential_input(&self) -> &str {
        &self.ui.credential_input
    }

    /// Compose field contents.
    pub fn compose_input(&self) -> &str {
        &self.ui.compose_input
    }

    /// Banner visibility flags.
    pub fn banners(&self) -> Banners {
        self.ui.banners
    }

    /// Connected client ids.
    pub fn roster(&self) -> &[String] {
        &self.ui.roster
    }

    /// Message log, oldest first.
    pub fn log(&self) -> &[LogEntry] {
        &self.ui.log
    }

    /// Pending alert, if any.
    pub fn alert(&self) -> Option<&'static str> {
        self.ui.alert
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use relaychat_client::{ClientMessage, ClientPacket, DisconnectReason, ServerMessage};

    use super::*;
    use crate::testing::FakeTransport;

    fn app() -> (App<FakeTransport>, FakeTransport) {
        let transport = FakeTransport::default();
        (App::new(transport.clone(), ClientConfig::default()), transport)
    }

    fn network(app: &mut App<FakeTransport>, event: NetworkEvent) -> Vec<AppAction> {
        let listener = app.listener().unwrap();
        app.handle(AppEvent::Network { listener, event })
    }

    fn online(app: &mut App<FakeTransport>, token: &str) {
        app.handle(AppEvent::CredentialEdited(token.into()));
        app.handle(AppEvent::ConnectPressed);
        network(app, NetworkEvent::Connected);
    }

    fn message(name: &str, text: &str) -> NetworkEvent {
        NetworkEvent::MessageReceived(ServerMessage { full_name: name.into(), message: text.into() })
    }

    #[test]
    fn blank_credential_raises_alert_without_network() {
        let (mut app, transport) = app();
        for raw in ["", "   ", "\t"] {
            app.handle(AppEvent::CredentialEdited(raw.into()));
            let actions = app.handle(AppEvent::ConnectPressed);

            assert_eq!(actions, vec![AppAction::Render]);
            assert_eq!(app.alert(), Some(EMPTY_CREDENTIAL_ALERT));
            app.handle(AppEvent::DismissAlert);
        }
        assert!(transport.opened().is_empty());
        assert_eq!(app.listener(), None);
    }

    #[test]
    fn credential_is_trimmed_before_sending() {
        let (mut app, transport) = app();
        app.handle(AppEvent::CredentialEdited("  jwt  ".into()));
        app.handle(AppEvent::ConnectPressed);
        assert_eq!(transport.opened(), vec!["jwt".to_string()]);
    }

    #[test]
    fn connect_is_fire_and_forget() {
        let (mut app, _) = app();
        app.handle(AppEvent::CredentialEdited("jwt".into()));
        app.handle(AppEvent::ConnectPressed);

        assert_eq!(app.session_state(), SessionState::Offline);
        network(&mut app, NetworkEvent::Connected);
        assert_eq!(app.session_state(), SessionState::Online);
        assert!(app.view().buttons.disconnect_enabled);
    }

    #[test]
    fn connect_pressed_while_online_is_ignored() {
        let (mut app, transport) = app();
        online(&mut app, "jwt");

        assert!(app.handle(AppEvent::ConnectPressed).is_empty());
        assert_eq!(transport.opened().len(), 1);
        assert_eq!(app.session_state(), SessionState::Online);
    }

    #[test]
    fn construction_failure_is_recorded_not_raised() {
        let (mut app, transport) = app();
        transport.fail_next_open();
        app.handle(AppEvent::CredentialEdited("jwt".into()));

        let actions = app.handle(AppEvent::ConnectPressed);

        assert_eq!(actions, vec![AppAction::Render]);
        assert!(matches!(app.last_failure(), Some(ConnectionError::Construction(_))));
        assert_eq!(app.session_state(), SessionState::Offline);
        assert_eq!(app.alert(), None);
    }

    #[test]
    fn offline_submit_shows_send_error() {
        let (mut app, transport) = app();
        app.handle(AppEvent::ComposeEdited("hello".into()));

        app.handle(AppEvent::Submit);

        let view = app.view();
        assert!(view.send_error.visible);
        assert_eq!(view.send_error.text, "You are offline. Connect to send messages.");
        assert_eq!(view.compose_input, "");
        assert!(transport.emitted().is_empty());
    }

    #[test]
    fn blank_submit_is_noop() {
        let (mut app, transport) = app();
        app.handle(AppEvent::ComposeEdited("   ".into()));
        assert!(app.handle(AppEvent::Submit).is_empty());
        assert!(!app.banners().send_error);

        online(&mut app, "jwt");
        app.handle(AppEvent::ComposeEdited(String::new()));
        assert!(app.handle(AppEvent::Submit).is_empty());
        assert!(transport.emitted().is_empty());
    }

    #[test]
    fn online_submit_emits_with_connection_id() {
        let (mut app, transport) = app();
        online(&mut app, "jwt");
        app.handle(AppEvent::ComposeEdited("hi all".into()));

        app.handle(AppEvent::Submit);

        assert_eq!(transport.emitted(), vec![ClientPacket::MessageFromClient(ClientMessage {
            id: "conn-1".into(),
            message: "hi all".into(),
        })]);
        assert_eq!(app.compose_input(), "");
    }

    #[test]
    fn emit_failure_is_recorded() {
        let (mut app, transport) = app();
        online(&mut app, "jwt");
        transport.fail_next_emit();
        app.handle(AppEvent::ComposeEdited("hi".into()));

        app.handle(AppEvent::Submit);

        assert!(matches!(app.last_failure(), Some(ConnectionError::Emit { .. })));
        assert_eq!(app.session_state(), SessionState::Online);
    }

    #[test]
    fn roster_is_replaced_not_merged() {
        let (mut app, _) = app();
        online(&mut app, "jwt");

        network(&mut app, NetworkEvent::ClientsUpdated(vec!["alice".into(), "bob".into()]));
        network(&mut app, NetworkEvent::ClientsUpdated(vec!["alice".into()]));

        assert_eq!(app.roster(), ["alice".to_string()]);
    }

    #[test]
    fn messages_are_appended_while_offline() {
        let (mut app, _) = app();
        app.handle(AppEvent::CredentialEdited("jwt".into()));
        app.handle(AppEvent::ConnectPressed);

        network(&mut app, message("Bob", "early"));

        assert_eq!(app.session_state(), SessionState::Offline);
        assert_eq!(app.log(), [LogEntry { display_name: "Bob".into(), text: "early".into() }]);
    }

    #[test]
    fn network_disconnect_resets_and_shows_token_error() {
        let (mut app, _) = app();
        online(&mut app, "jwt");
        network(&mut app, NetworkEvent::ClientsUpdated(vec!["alice".into()]));
        network(&mut app, message("Alice", "hi"));

        network(&mut app, NetworkEvent::Disconnected { reason: DisconnectReason::ServerClosed });

        let view = app.view();
        assert_eq!(view.status.label, "Offline");
        assert!(view.roster.is_empty());
        assert!(view.log.is_empty());
        assert!(view.token_error.visible);
        assert_eq!(view.token_error.text, "Invalid Json Web Token");
        assert_eq!(app.listener(), None);
    }

    #[test]
    fn rejected_handshake_shows_token_error() {
        let (mut app, _) = app();
        app.handle(AppEvent::CredentialEdited("bad".into()));
        app.handle(AppEvent::ConnectPressed);

        network(&mut app, NetworkEvent::Disconnected {
            reason: DisconnectReason::HandshakeFailed("401".into()),
        });

        assert!(app.banners().token_error);
        assert!(app.view().buttons.connect_enabled);
    }

    #[test]
    fn connect_hides_banners() {
        let (mut app, _) = app();
        app.handle(AppEvent::ComposeEdited("x".into()));
        app.handle(AppEvent::Submit);
        app.handle(AppEvent::CredentialEdited("bad".into()));
        app.handle(AppEvent::ConnectPressed);
        network(&mut app, NetworkEvent::Disconnected { reason: DisconnectReason::ServerClosed });
        assert!(app.banners().token_error);

        online(&mut app, "good");

        assert_eq!(app.banners(), Banners::default());
    }

    #[test]
    fn user_disconnect_resets_and_clears_credential() {
        let (mut app, transport) = app();
        online(&mut app, "jwt");
        network(&mut app, NetworkEvent::ClientsUpdated(vec!["alice".into()]));
        let listener = app.listener().unwrap();

        app.handle(AppEvent::DisconnectPressed);

        assert_eq!(transport.closes(), 1);
        assert_eq!(app.credential_input(), "");
        assert_eq!(app.session_state(), SessionState::Offline);
        assert!(app.roster().is_empty());

        app.handle(AppEvent::Network {
            listener,
            event: NetworkEvent::Disconnected { reason: DisconnectReason::ClientClosed },
        });
        assert!(!app.banners().token_error);
        assert_eq!(app.listener(), None);
    }

    #[test]
    fn disconnect_is_idempotent() {
        let (mut app, transport) = app();
        online(&mut app, "jwt");

        app.disconnect();
        let first = app.view();
        app.disconnect();

        assert_eq!(app.view(), first);
        assert_eq!(transport.closes(), 1);
    }

    #[test]
    fn disconnect_without_connection_keeps_credential() {
        let (mut app, _) = app();
        app.handle(AppEvent::CredentialEdited("jwt".into()));

        app.disconnect();

        assert_eq!(app.credential_input(), "jwt");
        assert_eq!(app.session_state(), SessionState::Offline);
    }

    #[test]
    fn disconnect_pressed_while_offline_is_ignored() {
        let (mut app, transport) = app();
        assert!(app.handle(AppEvent::DisconnectPressed).is_empty());
        assert_eq!(transport.closes(), 0);
    }

    #[test]
    fn reconnect_while_online_resets_interface() {
        let (mut app, _) = app();
        online(&mut app, "jwt");
        network(&mut app, NetworkEvent::ClientsUpdated(vec!["alice".into()]));

        app.connect();

        assert_eq!(app.session_state(), SessionState::Offline);
        assert!(app.roster().is_empty());
        assert_eq!(app.listener(), Some(ListenerId::FIRST.next()));
    }

    #[test]
    fn projection_is_stable() {
        let (mut app, _) = app();
        online(&mut app, "jwt");
        assert_eq!(app.view(), app.view());
    }

    #[test]
    fn quit_produces_quit_action() {
        let (mut app, _) = app();
        assert_eq!(app.handle(AppEvent::Quit), vec![AppAction::Quit]);
    }
}
