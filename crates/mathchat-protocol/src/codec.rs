//! Codec trait and the newline codec.
//!
//! A codec converts between [`ServerLine`]s / inbound text and the raw
//! frames a transport moves. The transport has already split the byte
//! stream on `\n`; the codec only deals with what is inside one frame.

use crate::{ProtocolError, ServerLine};

/// Longest inbound line accepted, in bytes (after framing).
pub const MAX_LINE_LEN: usize = 4096;

/// Encodes outbound lines and decodes inbound frames.
///
/// - `Send + Sync` → shared by every session task.
/// - `'static` → stored inside long-lived server state.
pub trait Codec: Send + Sync + 'static {
    /// Renders a line into a frame ready for the transport.
    fn encode(&self, line: &ServerLine) -> Vec<u8>;

    /// Turns one inbound frame into text.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidUtf8`] for non UTF-8 bytes,
    /// [`ProtocolError::InvalidMessage`] for frames over [`MAX_LINE_LEN`]
    /// or frames that contain a line break of their own.
    fn decode(&self, frame: &[u8]) -> Result<String, ProtocolError>;
}

// ---------------------------------------------------------------------------
// LineCodec
// ---------------------------------------------------------------------------

/// Plain text, one line per frame, `\n` terminated on the way out.
///
/// Inbound frames may still carry the `\r` of a telnet `\r\n`; it is
/// stripped so `"49\r"` and `"49"` decode the same. Any other `\r` or
/// `\n` inside a frame is rejected: one inbound frame must stay exactly one
/// outbound line.
///
/// ## Example
///
/// ```rust
/// use mathchat_protocol::{Codec, LineCodec, Nickname, ServerLine};
///
/// let codec = LineCodec;
/// let bytes = codec.encode(&ServerLine::Win { nickname: Nickname::new("ann") });
/// assert_eq!(bytes, b"ann win!\n");
/// assert_eq!(codec.decode(b"hello\r").unwrap(), "hello");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LineCodec;

impl Codec for LineCodec {
    fn encode(&self, line: &ServerLine) -> Vec<u8> {
        let mut bytes = line.to_string().into_bytes();
        bytes.push(b'\n');
        bytes
    }

    fn decode(&self, frame: &[u8]) -> Result<String, ProtocolError> {
        let frame = frame.strip_suffix(b"\r").unwrap_or(frame);
        if frame.len() > MAX_LINE_LEN {
            return Err(ProtocolError::InvalidMessage(format!(
                "line of {} bytes exceeds limit of {MAX_LINE_LEN}",
                frame.len()
            )));
        }
        if frame.iter().any(|b| matches!(b, b'\n' | b'\r')) {
            return Err(ProtocolError::InvalidMessage(
                "line contains an embedded line break".into(),
            ));
        }
        Ok(String::from_utf8(frame.to_vec())?)
    }
}
