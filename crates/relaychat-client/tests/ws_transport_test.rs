//! Integration tests for the socket.io transport.
//!
//! Each test runs a throwaway relay on a loopback port that speaks Engine.IO
//! v4 / socket.io v5 framing, and drives a real connection against it.

#![cfg(feature = "transport")]

use futures::{SinkExt, StreamExt};
use relaychat_client::{
    ClientConfig, ClientMessage, ClientPacket, ConnectConfig, Connection, Credential,
    DisconnectReason, NetworkEvent, Transport, transport::WsTransport,
};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{
    WebSocketStream,
    tungstenite::{
        Message,
        handshake::server::{ErrorResponse, Request, Response},
    },
};

type RelaySocket = WebSocketStream<TcpStream>;

const OPEN: &str =
    r#"0{"sid":"eng-1","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;

fn connect_config(url: String, token: &str) -> ConnectConfig {
    let credential = Credential::parse(token).expect("non-empty token");
    ClientConfig::new(url).connect_config(credential)
}

async fn send(ws: &mut RelaySocket, text: &str) {
    ws.send(Message::text(text.to_owned())).await.expect("relay send");
}

/// Next text frame from the client, or `None` once it closes.
async fn next_text(ws: &mut RelaySocket) -> Option<String> {
    while let Some(Ok(frame)) = ws.next().await {
        match frame {
            Message::Text(text) => return Some(text.as_str().to_owned()),
            Message::Close(_) => return None,
            _ => {},
        }
    }
    None
}

/// Drain the socket until the client goes away, returning its text frames.
async fn drain(ws: &mut RelaySocket) -> Vec<String> {
    let mut frames = Vec::new();
    while let Some(text) = next_text(ws).await {
        frames.push(text);
    }
    frames
}

/// Accept one client, open an engine session and accept its namespace join.
async fn accept_and_join(listener: &TcpListener, open: &str) -> RelaySocket {
    let (stream, _) = listener.accept().await.expect("accept");
    let mut ws = tokio_tungstenite::accept_async(stream).await.expect("handshake");
    send(&mut ws, open).await;
    assert_eq!(next_text(&mut ws).await.as_deref(), Some("40"));
    send(&mut ws, r#"40{"sid":"sock-1"}"#).await;
    ws
}

#[tokio::test]
async fn joins_namespace_and_relays_events() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let relay = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut seen = None;
        let mut ws = tokio_tungstenite::accept_hdr_async(stream, |req: &Request, resp: Response| {
            let token = req
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            seen = Some((token, req.uri().to_string()));
            Ok::<_, ErrorResponse>(resp)
        })
        .await
        .expect("handshake");

        send(&mut ws, OPEN).await;
        let join = next_text(&mut ws).await;
        send(&mut ws, r#"40{"sid":"sock-1"}"#).await;

        send(&mut ws, "2").await;
        let pong = next_text(&mut ws).await;

        send(&mut ws, r#"42["clients-updated",["alice","bob"]]"#).await;
        let emitted = next_text(&mut ws).await;

        let _ = ws.close(None).await;
        (seen, join, pong, emitted)
    });

    let config = connect_config(format!("ws://{addr}"), "token-1");
    let mut connection = WsTransport::new().open(&config).expect("open");

    assert_eq!(connection.next_event().await, Some(NetworkEvent::Connected));
    assert_eq!(connection.id().as_str(), "sock-1");
    assert_eq!(
        connection.next_event().await,
        Some(NetworkEvent::ClientsUpdated(vec!["alice".into(), "bob".into()]))
    );

    let id = connection.id().to_string();
    connection
        .emit(ClientPacket::MessageFromClient(ClientMessage { id, message: "hello".into() }))
        .expect("emit");

    let (seen, join, pong, emitted) = relay.await.expect("relay task");
    let (token, uri) = seen.expect("handshake request seen");
    assert_eq!(token.as_deref(), Some("token-1"));
    assert_eq!(uri, "/socket.io/?EIO=4&transport=websocket");
    assert_eq!(join.as_deref(), Some("40"));
    assert_eq!(pong.as_deref(), Some("3"));
    assert_eq!(
        emitted.as_deref(),
        Some(r#"42["message-form-client",{"id":"sock-1","message":"hello"}]"#)
    );

    assert_eq!(
        connection.next_event().await,
        Some(NetworkEvent::Disconnected { reason: DisconnectReason::ServerClosed })
    );
}

#[tokio::test]
async fn refused_join_reports_handshake_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let relay = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = tokio_tungstenite::accept_async(stream).await.expect("handshake");
        send(&mut ws, OPEN).await;
        let join = next_text(&mut ws).await;
        send(&mut ws, r#"44{"message":"invalid token"}"#).await;
        drain(&mut ws).await;
        join
    });

    let config = connect_config(format!("ws://{addr}"), "expired");
    let mut connection = WsTransport::new().open(&config).expect("open");

    assert_eq!(
        connection.next_event().await,
        Some(NetworkEvent::Disconnected {
            reason: DisconnectReason::HandshakeFailed("invalid token".into())
        })
    );
    assert_eq!(relay.await.expect("relay task").as_deref(), Some("40"));
}

#[tokio::test]
async fn refused_connection_reports_disconnect() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let config = connect_config(format!("ws://{addr}"), "token-1");
    let mut connection = WsTransport::new().open(&config).expect("open");

    assert!(matches!(
        connection.next_event().await,
        Some(NetworkEvent::Disconnected { reason: DisconnectReason::HandshakeFailed(_) })
    ));
}

#[tokio::test]
async fn close_request_leaves_namespace() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let relay = tokio::spawn(async move {
        let mut ws = accept_and_join(&listener, OPEN).await;
        drain(&mut ws).await
    });

    let config = connect_config(format!("ws://{addr}"), "token-1");
    let mut connection = WsTransport::new().open(&config).expect("open");
    assert_eq!(connection.next_event().await, Some(NetworkEvent::Connected));

    connection.close().expect("close");
    assert_eq!(
        connection.next_event().await,
        Some(NetworkEvent::Disconnected { reason: DisconnectReason::ClientClosed })
    );

    let frames = relay.await.expect("relay task");
    assert_eq!(frames, vec!["41".to_owned()]);
}

#[tokio::test]
async fn silent_relay_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let relay = tokio::spawn(async move {
        let open = r#"0{"sid":"eng-2","upgrades":[],"pingInterval":50,"pingTimeout":50}"#;
        let mut ws = accept_and_join(&listener, open).await;
        drain(&mut ws).await
    });

    let config = connect_config(format!("ws://{addr}"), "token-1");
    let mut connection = WsTransport::new().open(&config).expect("open");
    assert_eq!(connection.next_event().await, Some(NetworkEvent::Connected));

    assert!(matches!(
        connection.next_event().await,
        Some(NetworkEvent::Disconnected { reason: DisconnectReason::TransportError(_) })
    ));
    relay.await.expect("relay task");
}
