//! Session worker that owns the authoritative [`battle_core::CombatSession`].
//!
//! Receives commands from [`crate::RuntimeHandle`], applies them to the
//! session one at a time, and republishes the session's event outbox on the
//! [`EventBus`] after every command.

use std::sync::Arc;

use battle_core::{
    CardInstanceId, CharacterId, CombatEnv, CombatError, CombatLane, CombatSession, DrawOutcome,
    GameError, PlayOutcome, QueueReport, Side, SlotPosition,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, PersistenceEvent};
use crate::oracle::OracleManager;
use crate::repository::SnapshotRepository;

type Reply<T> = oneshot::Sender<Result<T>>;

/// Commands that can be sent to the session worker
pub enum Command {
    StartCombat {
        reply: Reply<()>,
    },
    SpawnEnemy {
        reply: Reply<CharacterId>,
    },
    StartTurn {
        side: Side,
        reply: Reply<u32>,
    },
    DrawCard {
        side: Side,
        reply: Reply<DrawOutcome>,
    },
    PlayCard {
        side: Side,
        card: CardInstanceId,
        lane: CombatLane,
        reply: Reply<PlayOutcome>,
    },
    ReserveEnemySlot {
        card: CardInstanceId,
        reply: Reply<Option<CombatLane>>,
    },
    RegisterGuard {
        reply: Reply<bool>,
    },
    DiscardCard {
        side: Side,
        card: CardInstanceId,
        reply: Reply<bool>,
    },
    EnqueueExecution {
        position: SlotPosition,
        owner: Side,
        reply: Reply<()>,
    },
    BeginResolution {
        reply: Reply<()>,
    },
    ProcessQueue {
        reply: Reply<QueueReport>,
    },
    CompleteTurn {
        reply: Reply<u32>,
    },
    Pause {
        reply: Reply<()>,
    },
    Resume {
        reply: Reply<()>,
    },
    EndSession {
        reply: Reply<()>,
    },
    /// Save a snapshot under the current turn number.
    SaveSnapshot {
        reply: Reply<u32>,
    },
    RestoreSnapshot {
        turn: u32,
        reply: Reply<()>,
    },
    /// Query the current session (read-only copy).
    QuerySession {
        reply: oneshot::Sender<CombatSession>,
    },
}

/// Background task that processes combat commands.
///
/// The worker never decides what to play; intent providers are driven by
/// [`crate::Runtime`].
pub struct SessionWorker {
    session: CombatSession,
    oracles: OracleManager,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    repository: Option<Arc<dyn SnapshotRepository>>,
    autosave: bool,
}

impl SessionWorker {
    pub fn new(
        session: CombatSession,
        oracles: OracleManager,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        repository: Option<Arc<dyn SnapshotRepository>>,
        autosave: bool,
    ) -> Self {
        info!(
            "SessionWorker initialized: phase={}, turn={}, stage={}",
            session.phase(),
            session.current_turn_number(),
            session.stage().id(),
        );

        Self {
            session,
            oracles,
            command_rx,
            event_bus,
            repository,
            autosave,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!("SessionWorker stopped: command channel closed");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartCombat { reply } => {
                let result = self.apply("StartCombat", |session, env| session.start_combat(env));
                send(reply, result, "StartCombat");
            }
            Command::SpawnEnemy { reply } => {
                let result = self.apply("SpawnEnemy", |session, env| session.spawn_enemy(env));
                send(reply, result, "SpawnEnemy");
            }
            Command::StartTurn { side, reply } => {
                let result = self.apply("StartTurn", |session, _| session.start_next_turn(side));
                send(reply, result, "StartTurn");
            }
            Command::DrawCard { side, reply } => {
                let result = self.apply("DrawCard", |session, _| session.draw_card(side));
                send(reply, result, "DrawCard");
            }
            Command::PlayCard {
                side,
                card,
                lane,
                reply,
            } => {
                let result =
                    self.apply("PlayCard", |session, _| session.play_card(side, card, lane));
                send(reply, result, "PlayCard");
            }
            Command::ReserveEnemySlot { card, reply } => {
                let result = self.apply("ReserveEnemySlot", |session, _| {
                    session.reserve_next_enemy_slot(card)
                });
                send(reply, result, "ReserveEnemySlot");
            }
            Command::RegisterGuard { reply } => {
                let result =
                    self.apply("RegisterGuard", |session, _| session.register_player_guard());
                send(reply, result, "RegisterGuard");
            }
            Command::DiscardCard { side, card, reply } => {
                let result =
                    self.apply("DiscardCard", |session, _| session.discard_card(side, card));
                send(reply, result, "DiscardCard");
            }
            Command::EnqueueExecution {
                position,
                owner,
                reply,
            } => {
                let result = self.apply("EnqueueExecution", |session, _| {
                    session.enqueue_execution(position, owner)
                });
                send(reply, result, "EnqueueExecution");
            }
            Command::BeginResolution { reply } => {
                let result = self.apply("BeginResolution", |session, _| session.begin_resolution());
                send(reply, result, "BeginResolution");
            }
            Command::ProcessQueue { reply } => {
                let result = self.apply("ProcessQueue", |session, _| {
                    session.process_execution_queue()
                });
                send(reply, result, "ProcessQueue");
            }
            Command::CompleteTurn { reply } => {
                let result =
                    self.apply("CompleteTurn", |session, _| session.complete_current_turn());
                if result.is_ok()
                    && self.autosave
                    && self.repository.is_some()
                    && let Err(error) = self.save_snapshot()
                {
                    warn!("Autosave failed: {}", error);
                }
                send(reply, result, "CompleteTurn");
            }
            Command::Pause { reply } => {
                let result = self.apply("Pause", |session, _| session.pause());
                send(reply, result, "Pause");
            }
            Command::Resume { reply } => {
                let result = self.apply("Resume", |session, _| session.resume());
                send(reply, result, "Resume");
            }
            Command::EndSession { reply } => {
                let result = self.apply("EndSession", |session, _| session.end_session());
                send(reply, result, "EndSession");
            }
            Command::SaveSnapshot { reply } => {
                let result = self.save_snapshot();
                send(reply, result, "SaveSnapshot");
            }
            Command::RestoreSnapshot { turn, reply } => {
                let result = self.restore_snapshot(turn);
                send(reply, result, "RestoreSnapshot");
            }
            Command::QuerySession { reply } => {
                if reply.send(self.session.clone()).is_err() {
                    debug!("QuerySession reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Runs one session operation and publishes whatever it emitted.
    fn apply<T>(
        &mut self,
        command: &'static str,
        op: impl FnOnce(&mut CombatSession, &CombatEnv<'_>) -> std::result::Result<T, CombatError>,
    ) -> Result<T> {
        let env = self.oracles.as_combat_env();
        let result = op(&mut self.session, &env);

        for event in self.session.drain_events() {
            self.event_bus.publish_combat(event);
        }

        if let Err(error) = &result {
            warn!(
                command,
                code = error.error_code(),
                kind = error.kind().as_str(),
                "Command rejected: {}",
                error
            );
        }
        result.map_err(RuntimeError::from)
    }

    fn save_snapshot(&self) -> Result<u32> {
        let repository = self
            .repository
            .as_ref()
            .ok_or(RuntimeError::RepositoryNotSet)?;
        let turn = self.session.current_turn_number();

        match repository.save(turn, &self.session.snapshot()) {
            Ok(()) => {
                debug!("Snapshot saved for turn {}", turn);
                self.event_bus
                    .publish(Event::Persistence(PersistenceEvent::SnapshotSaved { turn }));
                Ok(turn)
            }
            Err(error) => {
                self.event_bus
                    .publish(Event::Persistence(PersistenceEvent::SnapshotFailed {
                        turn,
                        error: error.to_string(),
                    }));
                Err(error.into())
            }
        }
    }

    fn restore_snapshot(&mut self, turn: u32) -> Result<()> {
        let repository = self
            .repository
            .as_ref()
            .ok_or(RuntimeError::RepositoryNotSet)?;
        let snapshot = repository
            .load(turn)?
            .ok_or(RuntimeError::SnapshotNotFound { turn })?;

        let env = self.oracles.as_combat_env();
        self.session.restore(snapshot, &env)?;

        info!("Session restored from turn {} snapshot", turn);
        self.event_bus
            .publish(Event::Persistence(PersistenceEvent::SnapshotRestored { turn }));
        Ok(())
    }
}

fn send<T>(reply: oneshot::Sender<T>, value: T, command: &'static str) {
    if reply.send(value).is_err() {
        debug!("{} reply channel closed (caller dropped)", command);
    }
}
