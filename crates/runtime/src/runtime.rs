//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive combat turn by turn.

use std::sync::Arc;

use battle_content::LoadedContent;
use battle_core::{
    CombatConfig, CombatPhase, CombatSession, CombatantTemplate, PlayOutcome, QueueReport, Side,
    StageId, StageOracle,
};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::{CardIntent, IntentProvider, ProviderKind, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::oracle::OracleManager;
use crate::repository::SnapshotRepository;
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Seed of the session RNG stream.
    pub seed: u64,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Save a snapshot after every completed turn (default: false)
    pub autosave: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            seed: 0,
            event_buffer_size: 100,
            command_buffer_size: 32,
            autosave: false,
        }
    }
}

/// What one [`Runtime::step`] did.
#[derive(Debug, Clone)]
pub struct TurnSummary {
    pub number: u32,
    pub side: Side,
    pub intent: Option<CardIntent>,
    /// Outcome of playing `intent`, if there was one.
    pub play: Option<PlayOutcome>,
    pub report: QueueReport,
    /// Phase after the turn was completed.
    pub phase: CombatPhase,
}

/// Main runtime that orchestrates combat
///
/// Runtime owns the session worker and the intent providers.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,

    player_provider: Option<Box<dyn IntentProvider>>,
    enemy_provider: Option<Box<dyn IntentProvider>>,

    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Plays one full turn.
    ///
    /// Starts combat or spawns a requested enemy when needed, starts the turn
    /// of the side after the last one (the player opens), plays the intent of
    /// that side's provider, resolves the queue and completes the turn.
    pub async fn step(&self) -> Result<TurnSummary> {
        let session = self.handle.query_session().await?;
        if session.is_terminal() {
            return Err(RuntimeError::SessionFinished);
        }

        let side = next_side(&session);
        let provider = self.provider(side)?;

        if session.phase() == CombatPhase::None {
            self.handle.start_combat().await?;
        } else if session.enemy().is_none() && session.pending_enemy().is_some() {
            self.handle.spawn_enemy().await?;
        }

        let number = self.handle.start_turn(side).await?;
        let session = self.handle.query_session().await?;
        if session.is_terminal() || session.character(side).is_none() {
            // A per-turn effect killed the acting side before anything was played.
            self.handle.complete_turn().await?;
            return Ok(TurnSummary {
                number,
                side,
                intent: None,
                play: None,
                report: QueueReport::default(),
                phase: session.phase(),
            });
        }

        let intent = provider.provide_intent(side, &session).await?;
        let play = match intent {
            Some(intent) => Some(
                self.handle
                    .play_card(side, intent.card, intent.lane)
                    .await?,
            ),
            None => None,
        };
        debug!("Turn {} ({}): intent {:?} -> {:?}", number, side, intent, play);

        self.handle.begin_resolution().await?;
        let report = self.handle.process_queue().await?;
        self.handle.complete_turn().await?;

        let phase = self.handle.query_session().await?.phase();
        Ok(TurnSummary {
            number,
            side,
            intent,
            play,
            report,
            phase,
        })
    }

    /// Steps until the session reaches a terminal phase or `max_turns` turns
    /// have been played. Returns the phase it stopped in.
    pub async fn run(&self, max_turns: u32) -> Result<CombatPhase> {
        for _ in 0..max_turns {
            let summary = self.step().await?;
            if summary.phase.is_terminal() {
                info!("Combat finished after turn {}: {}", summary.number, summary.phase);
                return Ok(summary.phase);
            }
        }
        Ok(self.handle.query_session().await?.phase())
    }

    /// Set the player intent provider
    pub fn set_player_provider(&mut self, provider: impl IntentProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Set the enemy intent provider
    pub fn set_enemy_provider(&mut self, provider: impl IntentProvider + 'static) {
        self.enemy_provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker to finish; clones of the handle that are still
    /// alive keep it running.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }

    fn provider(&self, side: Side) -> Result<&dyn IntentProvider> {
        let provider = match side {
            Side::Player => self.player_provider.as_deref(),
            Side::Enemy => self.enemy_provider.as_deref(),
        };
        provider.ok_or(RuntimeError::ProviderNotSet {
            kind: ProviderKind::from(side),
        })
    }
}

fn next_side(session: &CombatSession) -> Side {
    session
        .current_turn()
        .map_or(Side::Player, |turn| turn.side().opponent())
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    session: Option<CombatSession>,
    oracles: Option<OracleManager>,
    player: Option<CombatantTemplate>,
    stage: Option<StageId>,
    repository: Option<Arc<dyn SnapshotRepository>>,
    player_provider: Option<Box<dyn IntentProvider>>,
    enemy_provider: Option<Box<dyn IntentProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            session: None,
            oracles: None,
            player: None,
            stage: None,
            repository: None,
            player_provider: None,
            enemy_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses everything loaded from a data directory: oracles, the player
    /// loadout and the combat config.
    pub fn content(mut self, content: &LoadedContent) -> Self {
        self.oracles = Some(OracleManager::from(content));
        self.player = Some(content.player.clone());
        self.config.combat = content.config.clone();
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    pub fn player(mut self, player: CombatantTemplate) -> Self {
        self.player = Some(player);
        self
    }

    /// Stage to fight. Defaults to the lowest stage id in the catalog.
    pub fn stage(mut self, stage: StageId) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Provide an existing session instead of building a fresh one
    pub fn initial_session(mut self, session: CombatSession) -> Self {
        self.session = Some(session);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn repository(mut self, repository: Arc<dyn SnapshotRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Save a snapshot after every completed turn. Needs a repository.
    pub fn autosave(mut self, enable: bool) -> Self {
        self.config.autosave = enable;
        self
    }

    /// Set player intent provider (optional)
    pub fn player_provider(mut self, provider: impl IntentProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Set enemy intent provider (optional)
    pub fn enemy_provider(mut self, provider: impl IntentProvider + 'static) -> Self {
        self.enemy_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn the session worker
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;

        let session = match self.session {
            Some(session) => session,
            None => {
                let player = self.player.ok_or(RuntimeError::MissingPlayer)?;
                let stage = match self.stage {
                    Some(id) => oracles
                        .catalog()
                        .stage(id)
                        .ok_or(RuntimeError::UnknownStage(id))?,
                    None => oracles
                        .catalog()
                        .stages()
                        .next()
                        .cloned()
                        .ok_or(RuntimeError::MissingStage)?,
                };
                let env = oracles.as_combat_env();
                CombatSession::new(
                    self.config.combat.clone(),
                    self.config.seed,
                    &player,
                    &stage,
                    &env,
                )?
            }
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        if self.config.autosave && self.repository.is_none() {
            tracing::warn!("Autosave enabled without a snapshot repository; nothing will be saved");
        }

        let worker = SessionWorker::new(
            session,
            oracles,
            command_rx,
            event_bus,
            self.repository,
            self.config.autosave,
        );
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            player_provider: self.player_provider,
            enemy_provider: self.enemy_provider,
            worker_handle,
        })
    }
}
