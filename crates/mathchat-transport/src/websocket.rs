//! WebSocket transport implementation using `tokio-tungstenite`.
//!
//! Each WebSocket text frame carries exactly one line, so browsers can
//! join the same chat as telnet clients.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

use crate::{Connection, ConnectionId, Transport, TransportError};

type WsStream = tokio_tungstenite::WebSocketStream<TcpStream>;

/// How long a freshly accepted TCP stream may take to complete the
/// WebSocket upgrade.
pub const DEFAULT_UPGRADE_TIMEOUT: Duration = Duration::from_secs(10);

/// A WebSocket-based [`Transport`] that listens for incoming connections.
///
/// Upgrades run in their own tasks, bounded by a timeout, so a peer that
/// opens a socket and never speaks does not hold up anyone else's accept.
pub struct WebSocketTransport {
    listener: TcpListener,
    upgrade_timeout: Duration,
    upgraded_tx: mpsc::UnboundedSender<WebSocketConnection>,
    upgraded_rx: mpsc::UnboundedReceiver<WebSocketConnection>,
}

impl WebSocketTransport {
    /// Binds a new WebSocket transport to the given address.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(addr, "WebSocket transport listening");
        let (upgraded_tx, upgraded_rx) = mpsc::unbounded_channel();
        Ok(Self {
            listener,
            upgrade_timeout: DEFAULT_UPGRADE_TIMEOUT,
            upgraded_tx,
            upgraded_rx,
        })
    }

    /// Sets how long a peer may take to complete the WebSocket upgrade.
    pub fn with_upgrade_timeout(mut self, timeout: Duration) -> Self {
        self.upgrade_timeout = timeout;
        self
    }
}

/// Runs the WebSocket upgrade for one TCP stream and hands the result
/// back to the transport. Failed or stalled upgrades are dropped.
async fn upgrade(
    stream: TcpStream,
    addr: SocketAddr,
    timeout: Duration,
    upgraded: mpsc::UnboundedSender<WebSocketConnection>,
) {
    let ws = match tokio::time::timeout(timeout, tokio_tungstenite::accept_async(stream)).await {
        Ok(Ok(ws)) => ws,
        Ok(Err(e)) => {
            tracing::debug!(%addr, error = %e, "WebSocket upgrade failed");
            return;
        }
        Err(_) => {
            tracing::debug!(%addr, "WebSocket upgrade timed out");
            return;
        }
    };

    let id = ConnectionId::next();
    tracing::debug!(%id, %addr, "accepted WebSocket connection");

    let (sink, stream) = ws.split();
    let _ = upgraded.send(WebSocketConnection {
        id,
        sink: Mutex::new(sink),
        stream: Mutex::new(stream),
    });
}

impl Transport for WebSocketTransport {
    type Connection = WebSocketConnection;

    async fn accept(&mut self) -> Result<Self::Connection, TransportError> {
        loop {
            tokio::select! {
                Some(conn) = self.upgraded_rx.recv() => return Ok(conn),
                accepted = self.listener.accept() => {
                    let (stream, addr) = accepted.map_err(TransportError::AcceptFailed)?;
                    tokio::spawn(upgrade(
                        stream,
                        addr,
                        self.upgrade_timeout,
                        self.upgraded_tx.clone(),
                    ));
                }
            }
        }
    }

    fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// A single WebSocket connection.
pub struct WebSocketConnection {
    id: ConnectionId,
    sink: Mutex<SplitSink<WsStream, Message>>,
    stream: Mutex<SplitStream<WsStream>>,
}

fn send_error(e: WsError) -> TransportError {
    match e {
        WsError::ConnectionClosed | WsError::AlreadyClosed => {
            TransportError::ConnectionClosed(e.to_string())
        }
        other => TransportError::SendFailed(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            other,
        )),
    }
}

impl Connection for WebSocketConnection {
    async fn send(&self, data: &[u8]) -> Result<(), TransportError> {
        // The frame boundary already delimits the line.
        let line = data.strip_suffix(b"\n").unwrap_or(data);
        let text = String::from_utf8(line.to_vec()).map_err(|e| {
            TransportError::SendFailed(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                e,
            ))
        })?;
        self.sink
            .lock()
            .await
            .send(Message::Text(text.into()))
            .await
            .map_err(send_error)
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, TransportError> {
        let mut stream = self.stream.lock().await;
        loop {
            match stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_bytes().to_vec()));
                }
                Some(Ok(Message::Binary(data))) => {
                    return Ok(Some(data.into()));
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // skip ping/pong/frame
                Some(Err(e)) => {
                    return Err(TransportError::ReceiveFailed(
                        std::io::Error::new(
                            std::io::ErrorKind::ConnectionReset,
                            e,
                        ),
                    ));
                }
            }
        }
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.sink.lock().await.close().await.map_err(send_error)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
