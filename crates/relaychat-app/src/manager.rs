//! Connection manager.
//!
//! Owns the single permitted connection, its listener set and the
//! [`Session`]. Every session transition happens here, either in
//! [`ConnectionManager::connect`]/[`ConnectionManager::disconnect`] or while
//! applying an event from the attached listener set.
//!
//! # Invariants
//!
//! - At most one connection is held, and therefore at most one listener set
//!   is attached.
//! - Events tagged with any listener id other than the attached one are
//!   dropped.
//! - Session is Online only while a connection is attached, it is not being
//!   closed, and its handshake has been reported.

use relaychat_client::{
    ClientConfig, ClientPacket, Connection, ConnectionError, ConnectionId, Credential,
    DisconnectReason, ListenerId, NetworkEvent, ServerMessage, Transport,
};

use crate::{Session, SessionState};

/// Effect of an accepted network event, for the UI layer to reflect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Handshake completed; session is Online.
    WentOnline,
    /// Connection ended; session is Offline and the listener set is retired.
    WentOffline {
        /// The close was requested through [`ConnectionManager::disconnect`].
        user_requested: bool,
    },
    /// Relay pushed a new roster.
    RosterReplaced(Vec<String>),
    /// Relay broadcast a chat line.
    MessageArrived(ServerMessage),
}

struct Attached<C> {
    listener: ListenerId,
    connection: C,
    /// Close was requested; only the final `Disconnected` is still expected.
    closing: bool,
}

/// Lifecycle owner of the single connection.
pub struct ConnectionManager<T: Transport> {
    transport: T,
    config: ClientConfig,
    session: Session,
    attached: Option<Attached<T::Connection>>,
    next_listener: ListenerId,
}

impl<T: Transport> ConnectionManager<T> {
    /// Create a manager with no connection and an Offline session.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            session: Session::new(),
            attached: None,
            next_listener: ListenerId::FIRST,
        }
    }

    /// Current session state.
    pub fn session(&self) -> SessionState {
        self.session.state()
    }

    /// Id of the attached listener set, if any.
    pub fn attached_listener(&self) -> Option<ListenerId> {
        self.attached.as_ref().map(|a| a.listener)
    }

    /// Id of the held connection, if any.
    pub fn connection_id(&self) -> Option<&ConnectionId> {
        self.attached.as_ref().map(|a| a.connection.id())
    }

    /// True while a requested close awaits its acknowledgement.
    pub fn is_closing(&self) -> bool {
        self.attached.as_ref().is_some_and(|a| a.closing)
    }

    /// Client configuration used for new connections.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Open a new connection with `credential`.
    ///
    /// Any prior connection is detached and dropped first, together with
    /// whatever it had queued. If it was backing an Online session the
    /// session returns to Offline. The handshake outcome arrives later as an
    /// event on the returned listener set.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Construction`] if the transport rejects the
    /// configuration. The error is logged here; no listener set is attached.
    pub fn connect(&mut self, credential: Credential) -> Result<ListenerId, ConnectionError> {
        let config = self.config.connect_config(credential);

        if let Some(previous) = self.attached.take() {
            tracing::debug!(listener = %previous.listener, "detaching previous listener set");
            drop(previous);
            self.session.go_offline();
        }

        let connection = self.transport.open(&config).inspect_err(|e| {
            tracing::error!(error = %e, "error connecting to server");
        })?;

        let listener = self.next_listener;
        self.next_listener = listener.next();
        tracing::debug!(%listener, id = %connection.id(), "listener set attached");
        self.attached = Some(Attached { listener, connection, closing: false });
        Ok(listener)
    }

    /// Close the held connection, if any, and force the session Offline.
    ///
    /// Returns the listener set that was closed, or `None` if there was
    /// nothing to close (including a close already in progress). The
    /// attached listener set stays until the transport acknowledges the
    /// close with `Disconnected`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Disconnect`] if the close request could not
    /// be delivered. The connection is dropped in that case and the session
    /// is still Offline.
    pub fn disconnect(&mut self) -> Result<Option<ListenerId>, ConnectionError> {
        self.session.go_offline();

        let Some(attached) = self.attached.as_mut() else {
            return Ok(None);
        };
        if attached.closing {
            return Ok(None);
        }

        match attached.connection.close() {
            Ok(()) => {
                attached.closing = true;
                tracing::debug!(listener = %attached.listener, "close requested");
                Ok(Some(attached.listener))
            },
            Err(e) => {
                tracing::error!(error = %e, "error disconnecting from server");
                self.attached = None;
                Err(e)
            },
        }
    }

    /// Send a packet on the held connection.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Emit`] if there is no connection or it can
    /// no longer send.
    pub fn emit(&mut self, packet: ClientPacket) -> Result<(), ConnectionError> {
        let Some(attached) = self.attached.as_mut() else {
            return Err(ConnectionError::Emit {
                event: packet.event_name(),
                reason: "no connection".into(),
            });
        };

        attached.connection.emit(packet).inspect_err(|e| {
            tracing::error!(error = %e, "error sending message");
        })
    }

    /// Apply an event delivered through `listener`.
    ///
    /// Returns `None` if the event was dropped: it came from a detached
    /// listener set, or it is a late handshake for a connection being closed.
    pub fn apply(&mut self, listener: ListenerId, event: NetworkEvent) -> Option<Transition> {
        let Some(attached) = self.attached.as_ref() else {
            tracing::warn!(%listener, "dropping event: no listener set attached");
            return None;
        };
        if attached.listener != listener {
            tracing::warn!(%listener, attached = %attached.listener, "dropping event from detached listener set");
            return None;
        }

        match event {
            NetworkEvent::Connected => {
                if attached.closing {
                    tracing::debug!(%listener, "ignoring handshake for a closing connection");
                    return None;
                }
                self.session.go_online();
                Some(Transition::WentOnline)
            },
            NetworkEvent::Disconnected { reason } => {
                let user_requested = attached.closing;
                tracing::debug!(%listener, %reason, user_requested, "listener set retired");
                self.attached = None;
                self.session.go_offline();
                Some(Transition::WentOffline { user_requested })
            },
            NetworkEvent::ClientsUpdated(ids) => Some(Transition::RosterReplaced(ids)),
            NetworkEvent::MessageReceived(message) => Some(Transition::MessageArrived(message)),
        }
    }

    /// Wait for the next event from the attached listener set.
    ///
    /// Never resolves while nothing is attached. A connection whose event
    /// stream ends without a final `Disconnected` is reported as one.
    pub async fn next_event(&mut self) -> (ListenerId, NetworkEvent) {
        let Some(attached) = self.attached.as_mut() else {
            return std::future::pending().await;
        };

        let listener = attached.listener;
        let event = attached.connection.next_event().await.unwrap_or_else(|| {
            NetworkEvent::Disconnected {
                reason: DisconnectReason::TransportError("event stream ended".into()),
            }
        });
        (listener, event)
    }
}

impl<T: Transport> std::fmt::Debug for ConnectionManager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("session", &self.session.state())
            .field("listener", &self.attached_listener())
            .field("closing", &self.is_closing())
            .field("next_listener", &self.next_listener)
            .finish_non_exhaustive()
    }
}
