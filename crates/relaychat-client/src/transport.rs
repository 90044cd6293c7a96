//! socket.io transport for the client.
//!
//! Provides [`WsTransport`], whose connections speak Engine.IO v4 /
//! socket.io v5 over a WebSocket on a background tokio task. The task owns
//! the framing: it joins the default namespace, answers heartbeats and
//! watches the relay's liveness. It moves packets between channels and the
//! socket; session logic stays in the state machine.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use rand::{Rng, distr::Alphanumeric};
use relaychat_proto::{
    ClientFrame, ClientPacket, ENGINE_IO_VERSION, SOCKET_IO_PATH, ServerFrame, SocketPacket,
};
use tokio::{sync::mpsc, time::Instant};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        Message,
        client::IntoClientRequest,
        handshake::client::Request,
        http::{HeaderName, HeaderValue},
    },
};

use crate::{
    ConnectConfig, Connection, ConnectionError, ConnectionId, DisconnectReason, NetworkEvent,
    Transport,
};

/// Length of the locally generated id used until the relay assigns one.
const CONNECTION_ID_LEN: usize = 20;

/// How long the relay has to open the session and accept the join.
const JOIN_TIMEOUT: Duration = Duration::from_secs(20);

/// Commands from the handle to the connection task.
#[derive(Debug)]
enum Command {
    /// Send an encoded frame.
    Emit(String),
    /// Leave the namespace, send a close frame and stop.
    Close,
}

/// What the connection task reports to the handle.
#[derive(Debug)]
enum Inbound {
    /// Namespace joined, with the socket id the relay assigned.
    Joined(Option<ConnectionId>),
    /// Anything else.
    Event(NetworkEvent),
}

/// socket.io-over-WebSocket transport.
///
/// Must be used from within a tokio runtime; [`Transport::open`] spawns the
/// connection task on the current runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct WsTransport;

impl WsTransport {
    /// Create a transport.
    pub fn new() -> Self {
        Self
    }
}

impl Transport for WsTransport {
    type Connection = WsConnection;

    fn open(&mut self, config: &ConnectConfig) -> Result<WsConnection, ConnectionError> {
        let request = build_request(config)?;
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ConnectionError::Construction(format!("no async runtime: {e}")))?;

        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::channel(config.event_capacity.max(1));

        let task = runtime.spawn(run_connection(request, commands_rx, events_tx));
        let id = random_connection_id();
        tracing::debug!(%id, url = %config.server_url, "connection task spawned");

        Ok(WsConnection { id, commands: commands_tx, events: events_rx, abort_handle: task.abort_handle() })
    }
}

/// Handle to a socket.io connection.
///
/// The id is a local placeholder until the relay accepts the join, then the
/// socket id the relay assigned. Dropping the handle aborts the connection
/// task.
#[derive(Debug)]
pub struct WsConnection {
    id: ConnectionId,
    commands: mpsc::UnboundedSender<Command>,
    events: mpsc::Receiver<Inbound>,
    abort_handle: tokio::task::AbortHandle,
}

impl Connection for WsConnection {
    fn id(&self) -> &ConnectionId {
        &self.id
    }

    fn emit(&mut self, packet: ClientPacket) -> Result<(), ConnectionError> {
        let event = packet.event_name();
        let text = ClientFrame::Event(packet)
            .encode()
            .map_err(|e| ConnectionError::Emit { event, reason: e.to_string() })?;

        self.commands
            .send(Command::Emit(text))
            .map_err(|_| ConnectionError::Emit { event, reason: "connection task stopped".into() })
    }

    fn close(&mut self) -> Result<(), ConnectionError> {
        self.commands
            .send(Command::Close)
            .map_err(|_| ConnectionError::Disconnect("connection task already stopped".into()))
    }

    async fn next_event(&mut self) -> Option<NetworkEvent> {
        match self.events.recv().await? {
            Inbound::Joined(sid) => {
                if let Some(sid) = sid {
                    self.id = sid;
                }
                Some(NetworkEvent::Connected)
            },
            Inbound::Event(event) => Some(event),
        }
    }
}

impl Drop for WsConnection {
    fn drop(&mut self) {
        self.abort_handle.abort();
    }
}

/// Engine.IO WebSocket endpoint for a relay base URL.
///
/// `http`/`https` map to `ws`/`wss`. The socket.io path is appended unless
/// the URL already names it.
fn endpoint_url(server_url: &str) -> String {
    let url = if let Some(rest) = server_url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = server_url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        server_url.to_owned()
    };

    let base = url.trim_end_matches('/');
    let path = SOCKET_IO_PATH.trim_end_matches('/');
    let base = base.strip_suffix(path).unwrap_or(base);

    format!("{base}{SOCKET_IO_PATH}?EIO={ENGINE_IO_VERSION}&transport=websocket")
}

/// Build the handshake request with the credential header attached.
fn build_request(config: &ConnectConfig) -> Result<Request, ConnectionError> {
    let mut request = endpoint_url(&config.server_url)
        .into_client_request()
        .map_err(|e| ConnectionError::Construction(format!("invalid server url: {e}")))?;

    let name = HeaderName::from_bytes(config.auth_header.as_bytes())
        .map_err(|e| ConnectionError::Construction(format!("invalid auth header name: {e}")))?;
    let value = HeaderValue::from_str(config.credential.expose()).map_err(|e| {
        ConnectionError::Construction(format!("credential is not a valid header value: {e}"))
    })?;

    request.headers_mut().insert(name, value);
    Ok(request)
}

fn random_connection_id() -> ConnectionId {
    let id: String =
        rand::rng().sample_iter(Alphanumeric).take(CONNECTION_ID_LEN).map(char::from).collect();
    ConnectionId::new(id)
}

fn encode(frame: &ClientFrame) -> Option<Message> {
    match frame.encode() {
        Ok(text) => Some(Message::text(text)),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode control frame");
            None
        },
    }
}

/// Run the connection, bridging between channels and the socket.
///
/// Reports `Joined` once the relay accepts the namespace join, and always
/// finishes by reporting exactly one `Disconnected` event, unless the handle
/// has already been dropped.
async fn run_connection(
    request: Request,
    mut commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::Sender<Inbound>,
) {
    let stream = match connect_async(request).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            tracing::warn!(error = %e, "handshake failed");
            let reason = DisconnectReason::HandshakeFailed(e.to_string());
            let _ = events.send(Inbound::Event(NetworkEvent::Disconnected { reason })).await;
            return;
        },
    };

    let (mut sink, mut source) = stream.split();
    let mut joined = false;
    let mut liveness_window = JOIN_TIMEOUT;
    let liveness = tokio::time::sleep(JOIN_TIMEOUT);
    tokio::pin!(liveness);

    let reason = loop {
        tokio::select! {
            () = &mut liveness => {
                break if joined {
                    DisconnectReason::TransportError("relay stopped sending heartbeats".into())
                } else {
                    DisconnectReason::HandshakeFailed("relay did not accept the join in time".into())
                };
            },

            command = commands.recv() => match command {
                Some(Command::Emit(text)) => {
                    if let Err(e) = sink.send(Message::text(text)).await {
                        break DisconnectReason::TransportError(e.to_string());
                    }
                },
                Some(Command::Close) | None => {
                    if joined
                        && let Some(leave) = encode(&ClientFrame::Disconnect)
                        && let Err(e) = sink.send(leave).await
                    {
                        tracing::debug!(error = %e, "leave packet not delivered");
                    }
                    if let Err(e) = sink.close().await {
                        tracing::debug!(error = %e, "close frame not delivered");
                    }
                    break DisconnectReason::ClientClosed;
                },
            },

            frame = source.next() => match frame {
                Some(Ok(Message::Text(text))) => match ServerFrame::decode(text.as_str()) {
                    Ok(ServerFrame::Open(handshake)) => {
                        tracing::debug!(sid = %handshake.sid, "engine session opened");
                        liveness_window = handshake.liveness_window();
                        liveness.as_mut().reset(Instant::now() + liveness_window);
                        let Some(join) = encode(&ClientFrame::Connect) else {
                            break DisconnectReason::TransportError("cannot encode join".into());
                        };
                        if let Err(e) = sink.send(join).await {
                            break DisconnectReason::TransportError(e.to_string());
                        }
                    },
                    Ok(ServerFrame::Ping) => {
                        liveness.as_mut().reset(Instant::now() + liveness_window);
                        let Some(pong) = encode(&ClientFrame::Pong) else {
                            break DisconnectReason::TransportError("cannot encode pong".into());
                        };
                        if let Err(e) = sink.send(pong).await {
                            break DisconnectReason::TransportError(e.to_string());
                        }
                    },
                    Ok(ServerFrame::Message(SocketPacket::Connect { sid })) => {
                        if !joined {
                            joined = true;
                            let sid = sid.map(ConnectionId::new);
                            if events.send(Inbound::Joined(sid)).await.is_err() {
                                return;
                            }
                        }
                    },
                    Ok(ServerFrame::Message(SocketPacket::ConnectError(message))) => {
                        tracing::warn!(%message, "relay refused the join");
                        break DisconnectReason::HandshakeFailed(message);
                    },
                    Ok(ServerFrame::Message(SocketPacket::Event(packet))) => {
                        if events.send(Inbound::Event(packet.into())).await.is_err() {
                            return;
                        }
                    },
                    Ok(ServerFrame::Message(SocketPacket::Disconnect) | ServerFrame::Close) => {
                        break DisconnectReason::ServerClosed;
                    },
                    Ok(ServerFrame::Pong | ServerFrame::Upgrade | ServerFrame::Noop) => {},
                    Err(e) => tracing::warn!(error = %e, "dropping undecodable frame"),
                },
                Some(Ok(Message::Close(_))) | None => break DisconnectReason::ServerClosed,
                Some(Ok(_)) => {},
                Some(Err(e)) => break DisconnectReason::TransportError(e.to_string()),
            },
        }
    };

    tracing::debug!(%reason, "connection ended");
    let _ = events.send(Inbound::Event(NetworkEvent::Disconnected { reason })).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;

    fn connect_config(url: &str, header: &str, token: &str) -> Option<ConnectConfig> {
        let credential = crate::Credential::parse(token).ok()?;
        Some(ClientConfig::new(url).with_auth_header(header).connect_config(credential))
    }

    #[test]
    fn endpoint_appends_engine_io_path() {
        assert_eq!(
            endpoint_url("ws://127.0.0.1:3000"),
            "ws://127.0.0.1:3000/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            endpoint_url("https://relay.example/"),
            "wss://relay.example/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            endpoint_url("http://relay.example/socket.io/"),
            "ws://relay.example/socket.io/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn request_carries_credential_header() {
        let config = connect_config("ws://127.0.0.1:9", "Authorization", "token-1");
        let request = config.as_ref().map(build_request);

        let Some(Ok(request)) = request else {
            unreachable!("valid url and header build a request");
        };
        assert_eq!(
            request.headers().get("authorization").and_then(|v| v.to_str().ok()),
            Some("token-1")
        );
        assert_eq!(request.uri().path(), "/socket.io/");
        assert_eq!(request.uri().query(), Some("EIO=4&transport=websocket"));
    }

    #[test]
    fn invalid_url_is_a_construction_error() {
        let config = connect_config("not a url", "Authorization", "token");
        let result = config.as_ref().map(build_request);
        assert!(matches!(result, Some(Err(ConnectionError::Construction(_)))));
    }

    #[test]
    fn invalid_header_name_is_a_construction_error() {
        let config = connect_config("ws://127.0.0.1:9", "bad header", "token");
        let result = config.as_ref().map(build_request);
        assert!(matches!(result, Some(Err(ConnectionError::Construction(_)))));
    }

    #[test]
    fn open_outside_runtime_is_a_construction_error() {
        let config = connect_config("ws://127.0.0.1:9", "Authorization", "token");
        let result = config.as_ref().map(|c| WsTransport::new().open(c).map(|_| ()));
        assert!(matches!(result, Some(Err(ConnectionError::Construction(_)))));
    }

    #[test]
    fn generated_ids_have_fixed_length() {
        let id = random_connection_id();
        assert_eq!(id.as_str().len(), CONNECTION_ID_LEN);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
