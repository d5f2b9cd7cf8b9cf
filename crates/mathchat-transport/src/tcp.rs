//! Plain TCP transport with newline framing.
//!
//! This is what telnet and netcat speak: every `\n` ends a frame. The
//! read half and write half of the socket live behind separate mutexes so
//! a session's reader loop can sit in `recv` while its writer task keeps
//! calling `send`.

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Mutex;

use crate::{Connection, ConnectionId, Transport, TransportError};

/// Longest frame kept in memory, terminator included: a 4096-byte line
/// plus `\r\n`.
///
/// A longer line comes back cut at this length, and the rest of it is
/// thrown away, so the codec sees an oversized frame and rejects it.
pub const MAX_FRAME_LEN: usize = 4096 + 2;

/// A TCP [`Transport`] that listens for incoming line-oriented connections.
pub struct TcpLineTransport {
    listener: TcpListener,
}

impl TcpLineTransport {
    /// Binds a new TCP transport to the given address.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(addr, "TCP line transport listening");
        Ok(Self { listener })
    }
}

impl Transport for TcpLineTransport {
    type Connection = TcpLineConnection;

    async fn accept(&mut self) -> Result<Self::Connection, TransportError> {
        let (stream, peer) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let id = ConnectionId::next();
        tracing::debug!(%id, %peer, "accepted TCP connection");

        let (read_half, write_half) = stream.into_split();
        Ok(TcpLineConnection {
            id,
            reader: Mutex::new(BufReader::new(read_half)),
            writer: Mutex::new(write_half),
        })
    }

    fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// A single TCP connection framed by newlines.
pub struct TcpLineConnection {
    id: ConnectionId,
    reader: Mutex<BufReader<OwnedReadHalf>>,
    writer: Mutex<OwnedWriteHalf>,
}

impl Connection for TcpLineConnection {
    async fn send(&self, data: &[u8]) -> Result<(), TransportError> {
        let mut writer = self.writer.lock().await;
        writer
            .write_all(data)
            .await
            .map_err(TransportError::SendFailed)?;
        writer.flush().await.map_err(TransportError::SendFailed)
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, TransportError> {
        let mut reader = self.reader.lock().await;
        let mut frame = Vec::new();
        let read = (&mut *reader)
            .take(MAX_FRAME_LEN as u64)
            .read_until(b'\n', &mut frame)
            .await
            .map_err(TransportError::ReceiveFailed)?;
        if read == 0 {
            return Ok(None);
        }
        if frame.last() == Some(&b'\n') {
            frame.pop();
        } else if frame.len() == MAX_FRAME_LEN {
            tracing::debug!(id = %self.id, "line over limit, discarding the rest");
            discard_line(&mut reader).await?;
        }
        Ok(Some(frame))
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.writer
            .lock()
            .await
            .shutdown()
            .await
            .map_err(TransportError::SendFailed)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}

/// Skips buffered input up to and including the next `\n` (or EOF),
/// without holding more than one buffer's worth in memory.
async fn discard_line(reader: &mut BufReader<OwnedReadHalf>) -> Result<(), TransportError> {
    loop {
        let buf = reader.fill_buf().await.map_err(TransportError::ReceiveFailed)?;
        if buf.is_empty() {
            return Ok(());
        }
        match buf.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(());
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}
