//! Server implementation.
//!
//! An authoritative fixed-timestep loop around the world aggregate:
//! - session messages (join/command/leave/boost trigger) arrive on an mpsc
//!   channel and are drained at the start of each tick, serializing command
//!   application with the step
//! - exactly one tick's computation runs at a time, start to finish, with
//!   no suspension inside it
//! - each tick broadcasts one snapshot; join replies travel over a oneshot
//!   carried inside the join message
//!
//! A tick that runs long delays the next tick rather than overlapping it
//! (absolute-deadline sleep).

use std::time::Duration;

use anyhow::Context;
use arena_shared::{
    config::ArenaConfig,
    math::Dimension,
    net::{Command, PlayerView, Update, Welcome},
    player::PlayerId,
    world::World,
};
use tokio::{
    sync::{broadcast, mpsc, oneshot},
    time::Instant,
};
use tracing::{debug, info};

const SESSION_CHANNEL_CAPACITY: usize = 256;
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Message from the transport/session collaborator.
#[derive(Debug)]
pub enum SessionMsg {
    /// `init`: create a player, reply with id and world dimensions.
    Join {
        name: String,
        viewport: Dimension,
        reply: oneshot::Sender<Welcome>,
    },
    /// A gameplay command issued by a connected player.
    Command { player: PlayerId, command: Command },
    /// `disconnect`: takes effect no later than the start of the next tick.
    Leave { player: PlayerId },
    /// External boost spawn trigger; cadence is the caller's policy.
    SpawnBoost,
}

/// Channel endpoints handed to the transport collaborator.
#[derive(Debug, Clone)]
pub struct ServerHandle {
    sessions: mpsc::Sender<SessionMsg>,
    updates: broadcast::Sender<Update>,
}

impl ServerHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<Update> {
        self.updates.subscribe()
    }

    /// Joins a player and waits for the welcome produced at the next tick.
    pub async fn join(&self, name: &str, viewport: Dimension) -> anyhow::Result<Welcome> {
        let (reply, rx) = oneshot::channel();
        self.sessions
            .send(SessionMsg::Join {
                name: name.to_string(),
                viewport,
                reply,
            })
            .await
            .context("session channel closed")?;
        rx.await.context("welcome reply dropped")
    }

    pub async fn send(&self, player: PlayerId, command: Command) -> anyhow::Result<()> {
        self.sessions
            .send(SessionMsg::Command { player, command })
            .await
            .context("session channel closed")
    }

    pub async fn leave(&self, player: PlayerId) -> anyhow::Result<()> {
        self.sessions
            .send(SessionMsg::Leave { player })
            .await
            .context("session channel closed")
    }

    pub async fn spawn_boost(&self) -> anyhow::Result<()> {
        self.sessions
            .send(SessionMsg::SpawnBoost)
            .await
            .context("session channel closed")
    }
}

/// Game server: owns the world and the loop that steps it.
pub struct GameServer {
    pub cfg: ArenaConfig,
    world: World,
    inbox: mpsc::Receiver<SessionMsg>,
    updates: broadcast::Sender<Update>,
}

impl GameServer {
    /// Creates the server plus the handle the transport layer talks through.
    pub fn new(cfg: ArenaConfig) -> (Self, ServerHandle) {
        let (sessions, inbox) = mpsc::channel(SESSION_CHANNEL_CAPACITY);
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        let handle = ServerHandle {
            sessions,
            updates: updates.clone(),
        };
        let server = Self {
            world: World::new(&cfg),
            cfg,
            inbox,
            updates,
        };
        (server, handle)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Drains every queued session message. Non-blocking: commands that
    /// arrive during the step wait for the next tick.
    fn drain_sessions(&mut self) {
        while let Ok(msg) = self.inbox.try_recv() {
            match msg {
                SessionMsg::Join {
                    name,
                    viewport,
                    reply,
                } => {
                    let id = self.world.join(&name, viewport);
                    if let Some(player) = self.world.player(id) {
                        let welcome = Welcome {
                            id,
                            dimension: self.world.dimension,
                            player: PlayerView::of(player),
                        };
                        // The joiner may already be gone; that is its problem.
                        if reply.send(welcome).is_err() {
                            debug!(player = ?id, "welcome reply dropped");
                        }
                    }
                }
                SessionMsg::Command { player, command } => self.world.apply(player, command),
                SessionMsg::Leave { player } => self.world.leave(player),
                SessionMsg::SpawnBoost => self.world.spawn_boost(),
            }
        }
    }

    /// Executes one fixed simulation step: drain inbox, step world,
    /// broadcast the snapshot.
    pub fn step(&mut self) -> Update {
        self.drain_sessions();
        let update = self.world.step();
        // No subscribers is fine; the snapshot is simply unobserved.
        let _ = self.updates.send(update.clone());
        update
    }

    /// Runs the loop for a fixed number of ticks.
    pub async fn run_for_ticks(&mut self, ticks: u64) {
        let dt = Duration::from_secs_f32(1.0 / self.cfg.tick_hz as f32);
        let mut next = Instant::now();
        for _ in 0..ticks {
            next += dt;
            self.step();
            tokio::time::sleep_until(next).await;
        }
    }

    /// Runs the loop until the process exits.
    pub async fn run(&mut self) {
        let dt = Duration::from_secs_f32(1.0 / self.cfg.tick_hz as f32);
        info!(tick_hz = self.cfg.tick_hz, "tick loop running");
        let mut next = Instant::now();
        loop {
            next += dt;
            self.step();
            tokio::time::sleep_until(next).await;
        }
    }
}
