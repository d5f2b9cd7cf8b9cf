//! Broadcaster actor: an isolated Tokio task that owns the registry and
//! the game.
//!
//! The outside world only holds a [`BroadcasterHandle`], a thin wrapper
//! around an `mpsc::Sender`. Joins, leaves and messages all travel over
//! that one channel, so the loop sees them in a single total order and
//! processes each to completion (fan-out included) before reading the next.

use mathchat_game::{Game, GameStatus};
use mathchat_protocol::{ServerLine, SessionId};
use mathchat_session::{Registry, Session};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{mpsc, oneshot};

use crate::{BroadcastError, BroadcasterConfig};

/// Events sent to the control loop.
pub(crate) enum Command {
    /// Register a session that finished its handshake.
    Join { session: Session },

    /// Unregister a session and close its mailbox.
    Leave { id: SessionId },

    /// Fan a line out to everyone; chat lines are also checked as answers.
    Message { line: ServerLine },

    /// Request a snapshot of the loop's state.
    GetInfo { reply: oneshot::Sender<BroadcasterInfo> },

    /// Close every mailbox and stop.
    Shutdown,
}

/// A snapshot of broadcaster state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcasterInfo {
    /// Sessions currently registered.
    pub members: usize,
    /// State of the shared game.
    pub game_status: GameStatus,
    /// Rounds won so far.
    pub rounds_played: u64,
}

/// Handle to a running broadcaster. Cheap to clone.
///
/// Every method only enqueues an event; none of them waits for the
/// fan-out to happen, except [`info`](Self::info), which waits for the
/// loop to reach the request (so everything queued before it has been
/// processed by the time it returns).
#[derive(Clone)]
pub struct BroadcasterHandle {
    sender: mpsc::Sender<Command>,
}

impl BroadcasterHandle {
    async fn send(&self, cmd: Command) -> Result<(), BroadcastError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| BroadcastError::Unavailable)
    }

    /// Registers a session. The session's mailbox is owned by the registry
    /// from here on.
    pub async fn join(&self, session: Session) -> Result<(), BroadcastError> {
        self.send(Command::Join { session }).await
    }

    /// Unregisters a session, closing its mailbox.
    pub async fn leave(&self, id: SessionId) -> Result<(), BroadcastError> {
        self.send(Command::Leave { id }).await
    }

    /// Broadcasts a line to every registered session.
    ///
    /// Handshake-only lines (`Prompt`, `Welcome`) are dropped with a
    /// warning; they belong in a single session's mailbox.
    pub async fn publish(&self, line: ServerLine) -> Result<(), BroadcastError> {
        if !line.is_broadcast() {
            tracing::warn!(%line, "refusing to broadcast a handshake line");
            return Ok(());
        }
        self.send(Command::Message { line }).await
    }

    /// Returns the current membership and game status.
    pub async fn info(&self) -> Result<BroadcasterInfo, BroadcastError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::GetInfo { reply: reply_tx }).await?;
        reply_rx.await.map_err(|_| BroadcastError::Unavailable)
    }

    /// Tells the loop to close every mailbox and stop.
    pub async fn shutdown(&self) -> Result<(), BroadcastError> {
        self.send(Command::Shutdown).await
    }

    /// Returns `true` once the control loop has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// The internal control loop state. Runs inside a Tokio task.
struct Broadcaster<R> {
    registry: Registry,
    game: Game<R>,
    receiver: mpsc::Receiver<Command>,
}

impl<R: Rng> Broadcaster<R> {
    /// Processes events until shutdown or until every handle is dropped.
    async fn run(mut self) {
        tracing::info!("broadcaster started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                Command::Join { session } => self.handle_join(session),
                Command::Leave { id } => self.handle_leave(id),
                Command::Message { line } => self.handle_message(line),
                Command::GetInfo { reply } => {
                    let _ = reply.send(self.info());
                }
                Command::Shutdown => {
                    tracing::info!(
                        members = self.registry.len(),
                        "broadcaster shutting down"
                    );
                    break;
                }
            }
        }

        self.registry.clear();
        tracing::info!("broadcaster stopped");
    }

    fn handle_join(&mut self, session: Session) {
        let id = session.id();
        let nickname = session.nickname().clone();

        if let Some(previous) = self.registry.insert(session) {
            tracing::warn!(
                session_id = %id,
                previous = %previous.nickname(),
                "session joined twice, replacing earlier entry"
            );
        }

        tracing::info!(
            session_id = %id,
            %nickname,
            members = self.registry.len(),
            "session joined"
        );

        self.try_start_round();
    }

    fn handle_leave(&mut self, id: SessionId) {
        match self.registry.remove(id) {
            Some(session) => {
                tracing::info!(
                    session_id = %id,
                    nickname = %session.nickname(),
                    members = self.registry.len(),
                    "session left"
                );
                // `session` drops here, closing its mailbox.
            }
            None => {
                tracing::debug!(session_id = %id, "leave for unknown session, ignoring");
            }
        }
    }

    fn handle_message(&mut self, line: ServerLine) {
        tracing::debug!(%line, members = self.registry.len(), "broadcasting");
        self.registry.fan_out(&line);

        // The answer stays visible: its chat echo goes out before the win.
        if let ServerLine::Chat { nickname, text } = &line {
            if self.game.try_accept(nickname, text) {
                self.registry.fan_out(&ServerLine::Win {
                    nickname: nickname.clone(),
                });
                self.try_start_round();
            }
        }
    }

    fn try_start_round(&mut self) {
        if let Some(challenge) = self.game.try_start_round(self.registry.len()) {
            self.registry.fan_out(&ServerLine::NewGame {
                expression: challenge.expression(),
            });
        }
    }

    fn info(&self) -> BroadcasterInfo {
        BroadcasterInfo {
            members: self.registry.len(),
            game_status: self.game.status(),
            rounds_played: self.game.rounds_played(),
        }
    }
}

/// Spawns a broadcaster whose game is seeded from the operating system.
pub fn spawn(config: BroadcasterConfig) -> BroadcasterHandle {
    spawn_with_rng(config, StdRng::from_os_rng())
}

/// Spawns a broadcaster drawing challenges from `rng`.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_with_rng<R>(config: BroadcasterConfig, rng: R) -> BroadcasterHandle
where
    R: Rng + Send + 'static,
{
    let (tx, rx) = mpsc::channel(config.event_buffer.max(1));

    let actor = Broadcaster {
        registry: Registry::new(),
        game: Game::new(config.game, rng),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    BroadcasterHandle { sender: tx }
}
