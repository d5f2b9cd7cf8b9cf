//! # mathchat
//!
//! A line-oriented chat server where every connected client sees every
//! line, and whoever first answers the current arithmetic challenge wins
//! the round.
//!
//! This meta-crate ties the layers together:
//!
//! ```text
//! transport (frames) → protocol (lines) → session supervisor → broadcaster
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mathchat::prelude::*;
//!
//! # async fn start() -> Result<(), MathchatError> {
//! let server = MathchatServer::builder()
//!     .bind("127.0.0.1:8000")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::MathchatError;
pub use handler::{SessionContext, new_session};
pub use server::{MathchatServer, MathchatServerBuilder};

/// Re-exports of the types most users need.
pub mod prelude {
    pub use crate::{
        MathchatError, MathchatServer, MathchatServerBuilder, SessionContext, new_session,
    };
    pub use mathchat_broadcast::{
        BroadcastError, BroadcasterConfig, BroadcasterHandle, BroadcasterInfo,
    };
    pub use mathchat_game::{Challenge, GameConfig, GameError, GameStatus, Operator};
    pub use mathchat_protocol::{
        Codec, LineCodec, MAX_LINE_LEN, Nickname, ProtocolError, ServerLine, SessionId,
    };
    pub use mathchat_session::{SessionConfig, SessionError};
    pub use mathchat_transport::{
        Connection, ConnectionId, TcpLineConnection, TcpLineTransport, Transport,
        TransportError,
    };
    #[cfg(feature = "websocket")]
    pub use mathchat_transport::{WebSocketConnection, WebSocketTransport};
}
