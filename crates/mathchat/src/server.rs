//! `MathchatServer` builder and accept loop.
//!
//! This is the entry point for running a chat server. It ties together
//! the layers: transport → session supervisor → broadcaster.

use std::future::Future;
use std::sync::Arc;

use mathchat_broadcast::{BroadcasterConfig, BroadcasterHandle};
use mathchat_game::GameConfig;
use mathchat_session::SessionConfig;
use mathchat_transport::{TcpLineTransport, Transport};
#[cfg(feature = "websocket")]
use mathchat_transport::WebSocketTransport;

use crate::handler::{SessionContext, new_session};
use crate::MathchatError;

/// Builder for configuring and starting a mathchat server.
///
/// # Example
///
/// ```rust,ignore
/// use mathchat::prelude::*;
///
/// let server = MathchatServer::builder()
///     .bind("0.0.0.0:8000")
///     .game_config(GameConfig { min_participants: 3 })
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct MathchatServerBuilder {
    bind_addr: String,
    session_config: SessionConfig,
    broadcaster_config: BroadcasterConfig,
}

impl MathchatServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "localhost:8000".to_string(),
            session_config: SessionConfig::default(),
            broadcaster_config: BroadcasterConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the handshake configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Sets the broadcaster configuration (game settings included).
    pub fn broadcaster_config(mut self, config: BroadcasterConfig) -> Self {
        self.broadcaster_config = config;
        self
    }

    /// Sets only the game part of the broadcaster configuration.
    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.broadcaster_config.game = config;
        self
    }

    /// Binds a TCP line transport and starts the broadcaster.
    pub async fn build(self) -> Result<MathchatServer<TcpLineTransport>, MathchatError> {
        let transport = TcpLineTransport::bind(&self.bind_addr).await?;
        Ok(self.build_with(transport))
    }

    /// Binds a WebSocket transport and starts the broadcaster.
    #[cfg(feature = "websocket")]
    pub async fn build_websocket(
        self,
    ) -> Result<MathchatServer<WebSocketTransport>, MathchatError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;
        Ok(self.build_with(transport))
    }

    /// Starts the broadcaster and serves connections from `transport`.
    ///
    /// The bind address set on the builder is ignored. Must be called
    /// from within a Tokio runtime.
    pub fn build_with<T: Transport>(self, transport: T) -> MathchatServer<T> {
        let broadcaster = mathchat_broadcast::spawn(self.broadcaster_config);
        let context = Arc::new(SessionContext::new(broadcaster, self.session_config));
        MathchatServer { transport, context }
    }
}

impl Default for MathchatServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A mathchat server bound to a transport, with its broadcaster running.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct MathchatServer<T: Transport> {
    transport: T,
    context: Arc<SessionContext>,
}

impl MathchatServer<TcpLineTransport> {
    /// Creates a new builder.
    pub fn builder() -> MathchatServerBuilder {
        MathchatServerBuilder::new()
    }
}

impl<T: Transport> MathchatServer<T> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Handle to this server's broadcaster.
    pub fn broadcaster(&self) -> &BroadcasterHandle {
        &self.context.broadcaster
    }

    /// Runs the accept loop until the process is terminated.
    pub async fn run(self) -> Result<(), MathchatError> {
        self.run_until(std::future::pending()).await
    }

    /// Runs the accept loop until `shutdown` completes, then stops the
    /// broadcaster, which closes every session's mailbox.
    ///
    /// Accept failures are logged and do not stop the loop.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<(), MathchatError>
    where
        F: Future<Output = ()> + Send,
    {
        tracing::info!("mathchat server running");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("shutdown requested");
                    break;
                }
                accepted = self.transport.accept() => match accepted {
                    Ok(conn) => {
                        let context = Arc::clone(&self.context);
                        tokio::spawn(async move {
                            if let Err(e) = new_session(conn, context).await {
                                tracing::debug!(
                                    error = %e,
                                    "session ended with error"
                                );
                            }
                        });
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "accept failed");
                    }
                },
            }
        }

        // Already stopped is fine.
        let _ = self.context.broadcaster.shutdown().await;
        Ok(())
    }
}
