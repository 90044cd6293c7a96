//! Recording transport for unit tests.

use std::sync::{Arc, Mutex, MutexGuard};

use relaychat_client::{
    ClientPacket, ConnectConfig, Connection, ConnectionError, ConnectionId, Credential,
    NetworkEvent, Transport,
};

#[derive(Debug, Default)]
struct Log {
    opened: Vec<String>,
    emitted: Vec<ClientPacket>,
    closes: usize,
    fail_open: bool,
    fail_close: bool,
    fail_emit: bool,
}

/// Transport whose connections never produce events; tests feed events to
/// the state machine directly.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTransport {
    log: Arc<Mutex<Log>>,
}

#[allow(clippy::unwrap_used)]
impl FakeTransport {
    fn lock(&self) -> MutexGuard<'_, Log> {
        self.log.lock().unwrap()
    }

    pub(crate) fn opened(&self) -> Vec<String> {
        self.lock().opened.clone()
    }

    pub(crate) fn emitted(&self) -> Vec<ClientPacket> {
        self.lock().emitted.clone()
    }

    pub(crate) fn closes(&self) -> usize {
        self.lock().closes
    }

    pub(crate) fn fail_next_open(&self) {
        self.lock().fail_open = true;
    }

    pub(crate) fn fail_next_close(&self) {
        self.lock().fail_close = true;
    }

    pub(crate) fn fail_next_emit(&self) {
        self.lock().fail_emit = true;
    }
}

impl Transport for FakeTransport {
    type Connection = FakeConnection;

    fn open(&mut self, config: &ConnectConfig) -> Result<FakeConnection, ConnectionError> {
        let mut log = self.lock();
        if std::mem::take(&mut log.fail_open) {
            return Err(ConnectionError::Construction("refused".into()));
        }
        log.opened.push(config.credential.expose().to_owned());
        let id = ConnectionId::new(format!("conn-{}", log.opened.len()));
        Ok(FakeConnection { id, log: Arc::clone(&self.log) })
    }
}

pub(crate) struct FakeConnection {
    id: ConnectionId,
    log: Arc<Mutex<Log>>,
}

#[allow(clippy::unwrap_used)]
impl Connection for FakeConnection {
    fn id(&self) -> &ConnectionId {
        &self.id
    }

    fn emit(&mut self, packet: ClientPacket) -> Result<(), ConnectionError> {
        let mut log = self.log.lock().unwrap();
        if std::mem::take(&mut log.fail_emit) {
            return Err(ConnectionError::Emit { event: packet.event_name(), reason: "broken".into() });
        }
        log.emitted.push(packet);
        Ok(())
    }

    fn close(&mut self) -> Result<(), ConnectionError> {
        let mut log = self.log.lock().unwrap();
        if std::mem::take(&mut log.fail_close) {
            return Err(ConnectionError::Disconnect("already gone".into()));
        }
        log.closes += 1;
        Ok(())
    }

    async fn next_event(&mut self) -> Option<NetworkEvent> {
        std::future::pending().await
    }
}

#[allow(clippy::unwrap_used)]
pub(crate) fn credential(raw: &str) -> Credential {
    Credential::parse(raw).unwrap()
}
