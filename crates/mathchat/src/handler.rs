//! Session supervisor: handshake, join, read loop, leave.
//!
//! Each accepted connection gets its own Tokio task running
//! [`new_session`], plus a writer task draining the session's mailbox.
//! The flow is:
//!   1. Queue the nickname prompt, read one line → resolve the nickname
//!   2. Confirm it, announce the arrival, join the broadcaster
//!   3. Loop: read lines → publish them as chat
//!   4. On EOF/error: leave, announce the departure
//!
//! The supervisor never writes to the socket itself; every outbound line,
//! handshake included, goes through the mailbox so the writer task is the
//! only writer.

use std::sync::Arc;

use mathchat_broadcast::BroadcasterHandle;
use mathchat_protocol::{Codec, LineCodec, Nickname, ServerLine, SessionId};
use mathchat_session::{
    MailboxReceiver, Session, SessionConfig, SessionError, mailbox, resolve_nickname,
};
use mathchat_transport::Connection;

use crate::MathchatError;

/// What every session task needs: the broadcaster to talk to, handshake
/// settings, and the codec.
///
/// Shared behind an `Arc` by all connections of a server.
pub struct SessionContext<K: Codec = LineCodec> {
    pub broadcaster: BroadcasterHandle,
    pub config: SessionConfig,
    pub codec: K,
}

impl SessionContext<LineCodec> {
    /// Creates a context using the newline codec.
    pub fn new(broadcaster: BroadcasterHandle, config: SessionConfig) -> Self {
        Self {
            broadcaster,
            config,
            codec: LineCodec,
        }
    }
}

/// Drop guard that takes a joined session out of the broadcaster when the
/// supervisor exits, however it exits.
///
/// `Drop` is synchronous, so the leave and the departure announcement are
/// sent from a fire-and-forget task, in that order.
struct LeaveGuard {
    id: SessionId,
    nickname: Nickname,
    broadcaster: BroadcasterHandle,
}

impl Drop for LeaveGuard {
    fn drop(&mut self) {
        let id = self.id;
        let nickname = self.nickname.clone();
        let broadcaster = self.broadcaster.clone();
        tokio::spawn(async move {
            if broadcaster.leave(id).await.is_ok() {
                let _ = broadcaster.publish(ServerLine::Left { nickname }).await;
            }
        });
    }
}

/// Runs one client connection from accept to close.
///
/// Returns an error only if the session ended abnormally before or while
/// joining (hang-up during the handshake, broadcaster gone). A client
/// disconnecting after joining is the normal way out and returns `Ok`.
pub async fn new_session<C, K>(
    conn: C,
    ctx: Arc<SessionContext<K>>,
) -> Result<(), MathchatError>
where
    C: Connection,
    K: Codec,
{
    let conn = Arc::new(conn);
    let id = SessionId(conn.id().into_inner());
    tracing::debug!(session_id = %id, "handling new connection");

    let (mailbox, outbox) = mailbox();
    let mut writer = tokio::spawn(pump_mailbox(Arc::clone(&conn), outbox, Arc::clone(&ctx)));

    // --- Step 1: Handshake ---
    let _ = mailbox.send(ServerLine::Prompt);
    let nickname = perform_handshake(conn.as_ref(), &ctx, id).await?;

    // --- Step 2: Join ---
    let _ = mailbox.send(ServerLine::Welcome {
        nickname: nickname.clone(),
    });
    ctx.broadcaster
        .publish(ServerLine::Arrived {
            nickname: nickname.clone(),
        })
        .await?;
    // The registry becomes the only holder of the mailbox sender here.
    ctx.broadcaster
        .join(Session::new(id, nickname.clone(), mailbox))
        .await?;
    let _guard = LeaveGuard {
        id,
        nickname: nickname.clone(),
        broadcaster: ctx.broadcaster.clone(),
    };
    tracing::info!(session_id = %id, %nickname, "client joined");

    // --- Step 3: Read loop ---
    // Also ends once the writer is gone: the client can no longer hear
    // the chat, so it leaves like any other disconnect.
    loop {
        let received = tokio::select! {
            received = conn.recv() => received,
            _ = &mut writer => {
                tracing::info!(session_id = %id, %nickname, "writer stopped");
                break;
            }
        };
        let frame = match received {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                tracing::info!(session_id = %id, %nickname, "connection closed");
                break;
            }
            Err(e) => {
                tracing::debug!(session_id = %id, error = %e, "recv error");
                break;
            }
        };

        let text = match ctx.codec.decode(&frame) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(session_id = %id, error = %e, "skipping undecodable line");
                continue;
            }
        };

        ctx.broadcaster
            .publish(ServerLine::Chat {
                nickname: nickname.clone(),
                text,
            })
            .await?;
    }

    // _guard drops here → leave + "has left".
    Ok(())
}

/// Reads the nickname line, bounded by the handshake timeout.
async fn perform_handshake<C, K>(
    conn: &C,
    ctx: &SessionContext<K>,
    id: SessionId,
) -> Result<Nickname, MathchatError>
where
    C: Connection,
    K: Codec,
{
    let frame = match tokio::time::timeout(ctx.config.handshake_timeout, conn.recv()).await {
        Ok(Ok(Some(frame))) => frame,
        Ok(Ok(None)) => return Err(SessionError::ClosedBeforeHandshake.into()),
        Ok(Err(e)) => return Err(e.into()),
        Err(_) => return Err(SessionError::HandshakeTimedOut.into()),
    };

    let raw = match ctx.codec.decode(&frame) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!(session_id = %id, error = %e, "undecodable nickname, using placeholder");
            String::new()
        }
    };
    Ok(resolve_nickname(&raw, id, &ctx.config))
}

/// Writer task: drains the mailbox to the transport until it is closed,
/// then closes the connection.
///
/// Stops early on a write error, closing the connection as well; the
/// supervisor notices the writer is gone and leaves.
async fn pump_mailbox<C, K>(
    conn: Arc<C>,
    mut outbox: MailboxReceiver,
    ctx: Arc<SessionContext<K>>,
) where
    C: Connection,
    K: Codec,
{
    while let Some(line) = outbox.recv().await {
        let frame = ctx.codec.encode(&line);
        if let Err(e) = conn.send(&frame).await {
            tracing::debug!(conn_id = %conn.id(), error = %e, "write failed, stopping writer");
            break;
        }
    }

    if let Err(e) = conn.close().await {
        tracing::debug!(conn_id = %conn.id(), error = %e, "close failed");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use mathchat_broadcast::BroadcasterConfig;
    use mathchat_transport::{ConnectionId, TransportError};
    use tokio::sync::{Mutex, mpsc};

    use super::*;

    /// A connection fed from a channel whose writes start failing after
    /// `writes_allowed` frames, like a client that stopped reading.
    struct DeafConnection {
        id: ConnectionId,
        inbound: Mutex<mpsc::UnboundedReceiver<Vec<u8>>>,
        writes: AtomicUsize,
        writes_allowed: usize,
    }

    impl Connection for DeafConnection {
        async fn send(&self, _data: &[u8]) -> Result<(), TransportError> {
            if self.writes.fetch_add(1, Ordering::SeqCst) < self.writes_allowed {
                Ok(())
            } else {
                Err(TransportError::SendFailed(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "peer stopped reading",
                )))
            }
        }

        async fn recv(&self) -> Result<Option<Vec<u8>>, TransportError> {
            Ok(self.inbound.lock().await.recv().await)
        }

        async fn close(&self) -> Result<(), TransportError> {
            Ok(())
        }

        fn id(&self) -> ConnectionId {
            self.id
        }
    }

    async fn next_line(rx: &mut MailboxReceiver) -> String {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for a line")
            .expect("mailbox should be open")
            .to_string()
    }

    #[tokio::test]
    async fn test_failed_write_ends_session_with_departure() {
        let broadcaster = mathchat_broadcast::spawn(BroadcasterConfig::default());
        let ctx = Arc::new(SessionContext::new(broadcaster.clone(), SessionConfig::default()));

        // An ordinary member watching the chat.
        let (watcher_tx, mut watcher_rx) = mailbox();
        broadcaster
            .join(Session::new(SessionId(0), Nickname::new("W"), watcher_tx))
            .await
            .unwrap();

        // Prompt and welcome get through, everything after that fails.
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let conn = DeafConnection {
            id: ConnectionId::next(),
            inbound: Mutex::new(inbound_rx),
            writes: AtomicUsize::new(0),
            writes_allowed: 2,
        };
        let session = tokio::spawn(new_session(conn, Arc::clone(&ctx)));
        inbound_tx.send(b"deaf".to_vec()).unwrap();

        assert_eq!(next_line(&mut watcher_rx).await, "deaf has arrived");
        // Two members now, so a round starts; sending it to "deaf" fails.
        assert!(next_line(&mut watcher_rx).await.starts_with("new game: "));
        assert_eq!(next_line(&mut watcher_rx).await, "deaf has left");

        // The inbound side never closed; the session ended on its own.
        let result = tokio::time::timeout(Duration::from_secs(5), session)
            .await
            .expect("session should end")
            .expect("session task should not panic");
        assert!(result.is_ok());
        assert_eq!(broadcaster.info().await.unwrap().members, 1);
        drop(inbound_tx);
    }

    #[tokio::test]
    async fn test_undecodable_nickname_gets_placeholder() {
        let broadcaster = mathchat_broadcast::spawn(BroadcasterConfig::default());
        let ctx = Arc::new(SessionContext::new(broadcaster.clone(), SessionConfig::default()));

        let (watcher_tx, mut watcher_rx) = mailbox();
        broadcaster
            .join(Session::new(SessionId(0), Nickname::new("W"), watcher_tx))
            .await
            .unwrap();

        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let id = ConnectionId::next();
        let conn = DeafConnection {
            id,
            inbound: Mutex::new(inbound_rx),
            writes: AtomicUsize::new(0),
            writes_allowed: usize::MAX,
        };
        let _session = tokio::spawn(new_session(conn, ctx));
        inbound_tx.send(vec![0xff, 0xfe, b'x']).unwrap();

        assert_eq!(
            next_line(&mut watcher_rx).await,
            format!("anonymous-{} has arrived", id.into_inner())
        );
    }
}
