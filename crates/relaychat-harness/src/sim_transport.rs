//! In-memory transport.
//!
//! `SimTransport` records every connection it opens and lets tests push
//! [`NetworkEvent`]s into any of them. Clones share state, so a test keeps a
//! clone for injection and inspection while the [`relaychat_app::App`] owns
//! the other.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use relaychat_client::{
    ClientPacket, ConnectConfig, Connection, ConnectionError, ConnectionId, DisconnectReason,
    NetworkEvent, Transport,
};
use tokio::sync::mpsc;

/// Everything known about one opened connection.
#[derive(Debug)]
struct ConnectionRecord {
    id: ConnectionId,
    config: ConnectConfig,
    events: mpsc::UnboundedSender<NetworkEvent>,
    queued: usize,
    emitted: Vec<ClientPacket>,
    close_requests: usize,
    dropped: bool,
}

#[derive(Debug, Default)]
struct Shared {
    connections: Vec<ConnectionRecord>,
    on_open: Vec<NetworkEvent>,
    ack_closes: bool,
    fail_open: Option<String>,
    fail_close: bool,
    fail_emit: bool,
}

/// In-memory transport for simulation.
#[derive(Debug, Clone)]
pub struct SimTransport {
    shared: Arc<Mutex<Shared>>,
}

impl Default for SimTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SimTransport {
    /// Transport whose connections stay silent until events are pushed.
    ///
    /// Close requests are acknowledged with `Disconnected(ClientClosed)`.
    pub fn new() -> Self {
        let shared = Shared { ack_closes: true, ..Shared::default() };
        Self { shared: Arc::new(Mutex::new(shared)) }
    }

    /// Transport that completes every handshake immediately.
    pub fn accepting() -> Self {
        Self::new().with_on_open([NetworkEvent::Connected])
    }

    /// Transport that refuses every handshake, as a relay rejecting the
    /// credential would.
    pub fn rejecting() -> Self {
        Self::new().with_on_open([NetworkEvent::Disconnected {
            reason: DisconnectReason::HandshakeFailed("401 Unauthorized".into()),
        }])
    }

    /// Queue `events` on every connection as soon as it is opened.
    #[must_use]
    pub fn with_on_open(self, events: impl IntoIterator<Item = NetworkEvent>) -> Self {
        self.set_on_open(events);
        self
    }

    /// Replace the events queued on connections opened from now on.
    pub fn set_on_open(&self, events: impl IntoIterator<Item = NetworkEvent>) {
        self.lock().on_open = events.into_iter().collect();
    }

    /// Do not acknowledge close requests.
    #[must_use]
    pub fn without_close_ack(self) -> Self {
        self.lock().ack_closes = false;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next `open` fail with a construction error.
    pub fn fail_next_open(&self, reason: impl Into<String>) {
        self.lock().fail_open = Some(reason.into());
    }

    /// Make the next `close` fail.
    pub fn fail_next_close(&self) {
        self.lock().fail_close = true;
    }

    /// Make the next `emit` fail.
    pub fn fail_next_emit(&self) {
        self.lock().fail_emit = true;
    }

    /// Push an event into the connection opened `index`-th (zero-based).
    ///
    /// Returns `false` if there is no such connection or it was dropped.
    pub fn push(&self, index: usize, event: NetworkEvent) -> bool {
        let mut shared = self.lock();
        let Some(record) = shared.connections.get_mut(index) else {
            return false;
        };
        if record.dropped || record.events.send(event).is_err() {
            return false;
        }
        record.queued += 1;
        true
    }

    /// Push an event into the most recently opened connection.
    pub fn push_latest(&self, event: NetworkEvent) -> bool {
        match self.open_count().checked_sub(1) {
            Some(index) => self.push(index, event),
            None => false,
        }
    }

    /// Number of successful `open` calls.
    pub fn open_count(&self) -> usize {
        self.lock().connections.len()
    }

    /// Connections opened and not yet dropped.
    pub fn live_connections(&self) -> usize {
        self.lock().connections.iter().filter(|c| !c.dropped).count()
    }

    /// Events queued on live connections and not yet consumed.
    pub fn queued(&self) -> usize {
        self.lock().connections.iter().filter(|c| !c.dropped).map(|c| c.queued).sum()
    }

    /// Credential sent with each opened connection, in open order.
    pub fn credentials(&self) -> Vec<String> {
        self.lock().connections.iter().map(|c| c.config.credential.expose().to_owned()).collect()
    }

    /// Configuration of the connection opened `index`-th.
    pub fn config(&self, index: usize) -> Option<ConnectConfig> {
        self.lock().connections.get(index).map(|c| c.config.clone())
    }

    /// Id of the connection opened `index`-th.
    pub fn connection_id(&self, index: usize) -> Option<ConnectionId> {
        self.lock().connections.get(index).map(|c| c.id.clone())
    }

    /// Packets emitted on every connection, in order.
    pub fn emitted(&self) -> Vec<ClientPacket> {
        self.lock().connections.iter().flat_map(|c| c.emitted.iter().cloned()).collect()
    }

    /// Close requests received across all connections.
    pub fn close_requests(&self) -> usize {
        self.lock().connections.iter().map(|c| c.close_requests).sum()
    }

    /// Whether the connection opened `index`-th has been dropped.
    pub fn is_dropped(&self, index: usize) -> bool {
        self.lock().connections.get(index).is_some_and(|c| c.dropped)
    }
}

impl Transport for SimTransport {
    type Connection = SimConnection;

    fn open(&mut self, config: &ConnectConfig) -> Result<SimConnection, ConnectionError> {
        let mut shared = self.lock();
        if let Some(reason) = shared.fail_open.take() {
            return Err(ConnectionError::Construction(reason));
        }

        let index = shared.connections.len();
        let id = ConnectionId::new(format!("sim-{index}"));
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let mut queued = 0;
        for event in &shared.on_open {
            if events_tx.send(event.clone()).is_ok() {
                queued += 1;
            }
        }

        tracing::debug!(%id, "sim connection opened");
        shared.connections.push(ConnectionRecord {
            id: id.clone(),
            config: config.clone(),
            events: events_tx,
            queued,
            emitted: Vec::new(),
            close_requests: 0,
            dropped: false,
        });

        Ok(SimConnection { index, id, events: events_rx, shared: Arc::clone(&self.shared) })
    }
}

/// Connection produced by [`SimTransport`].
#[derive(Debug)]
pub struct SimConnection {
    index: usize,
    id: ConnectionId,
    events: mpsc::UnboundedReceiver<NetworkEvent>,
    shared: Arc<Mutex<Shared>>,
}

impl SimConnection {
    fn with_record<R>(&self, f: impl FnOnce(&mut Shared, usize) -> R) -> R {
        let mut shared = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut shared, self.index)
    }
}

impl Connection for SimConnection {
    fn id(&self) -> &ConnectionId {
        &self.id
    }

    fn emit(&mut self, packet: ClientPacket) -> Result<(), ConnectionError> {
        self.with_record(|shared, index| {
            if std::mem::take(&mut shared.fail_emit) {
                return Err(ConnectionError::Emit {
                    event: packet.event_name(),
                    reason: "injected failure".into(),
                });
            }
            if let Some(record) = shared.connections.get_mut(index) {
                record.emitted.push(packet);
            }
            Ok(())
        })
    }

    fn close(&mut self) -> Result<(), ConnectionError> {
        self.with_record(|shared, index| {
            if std::mem::take(&mut shared.fail_close) {
                return Err(ConnectionError::Disconnect("injected failure".into()));
            }
            let ack = shared.ack_closes;
            if let Some(record) = shared.connections.get_mut(index) {
                record.close_requests += 1;
                if ack {
                    let event = NetworkEvent::Disconnected { reason: DisconnectReason::ClientClosed };
                    if record.events.send(event).is_ok() {
                        record.queued += 1;
                    }
                }
            }
            Ok(())
        })
    }

    async fn next_event(&mut self) -> Option<NetworkEvent> {
        let event = self.events.recv().await;
        if event.is_some() {
            self.with_record(|shared, index| {
                if let Some(record) = shared.connections.get_mut(index) {
                    record.queued = record.queued.saturating_sub(1);
                }
            });
        }
        event
    }
}

impl Drop for SimConnection {
    fn drop(&mut self) {
        self.with_record(|shared, index| {
            if let Some(record) = shared.connections.get_mut(index) {
                record.dropped = true;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use relaychat_client::{ClientConfig, Credential};

    use super::*;

    fn connect_config(token: &str) -> Option<ConnectConfig> {
        Credential::parse(token).ok().map(|c| ClientConfig::default().connect_config(c))
    }

    #[test]
    fn open_records_configuration() {
        let mut transport = SimTransport::new();
        let config = connect_config("jwt");
        let connection = config.as_ref().map(|c| transport.open(c));

        assert!(matches!(connection, Some(Ok(_))));
        assert_eq!(transport.open_count(), 1);
        assert_eq!(transport.credentials(), vec!["jwt".to_string()]);
        assert_eq!(transport.connection_id(0), Some(ConnectionId::new("sim-0")));
    }

    #[test]
    fn injected_open_failure_is_one_shot() {
        let mut transport = SimTransport::new();
        transport.fail_next_open("nope");
        let config = connect_config("jwt");

        let first = config.as_ref().map(|c| transport.open(c).map(|_| ()));
        let second = config.as_ref().map(|c| transport.open(c).map(|_| ()));

        assert_eq!(first, Some(Err(ConnectionError::Construction("nope".into()))));
        assert_eq!(second, Some(Ok(())));
    }

    #[test]
    fn dropping_connection_marks_record() {
        let mut transport = SimTransport::accepting();
        let config = connect_config("jwt");
        let connection = config.as_ref().and_then(|c| transport.open(c).ok());

        assert_eq!(transport.queued(), 1);
        drop(connection);

        assert!(transport.is_dropped(0));
        assert_eq!(transport.live_connections(), 0);
        assert_eq!(transport.queued(), 0);
        assert!(!transport.push(0, NetworkEvent::Connected));
    }

    #[test]
    fn close_is_acknowledged() {
        let mut transport = SimTransport::new();
        let config = connect_config("jwt");
        let mut connection = config.as_ref().and_then(|c| transport.open(c).ok());

        let closed = connection.as_mut().map(Connection::close);

        assert_eq!(closed, Some(Ok(())));
        assert_eq!(transport.close_requests(), 1);
        assert_eq!(transport.queued(), 1);
    }
}
