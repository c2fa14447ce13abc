//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers one async method per
//! session operation, plus topic subscriptions on the event bus.
use std::collections::HashMap;

use battle_core::{
    CardInstanceId, CharacterId, CombatLane, CombatSession, DrawOutcome, PlayOutcome, QueueReport,
    Side, SlotPosition,
};
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Sends a command built around a fresh reply channel and awaits the answer.
    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Enter the stage: draw the opening hand and spawn the first enemy.
    pub async fn start_combat(&self) -> Result<()> {
        self.request(|reply| Command::StartCombat { reply }).await?
    }

    /// Spawn the enemy the stage requested after the previous one died.
    pub async fn spawn_enemy(&self) -> Result<CharacterId> {
        self.request(|reply| Command::SpawnEnemy { reply }).await?
    }

    /// Start the next turn for `side`. Returns the new turn number.
    pub async fn start_turn(&self, side: Side) -> Result<u32> {
        self.request(|reply| Command::StartTurn { side, reply }).await?
    }

    pub async fn draw_card(&self, side: Side) -> Result<DrawOutcome> {
        self.request(|reply| Command::DrawCard { side, reply }).await?
    }

    pub async fn play_card(
        &self,
        side: Side,
        card: CardInstanceId,
        lane: CombatLane,
    ) -> Result<PlayOutcome> {
        self.request(|reply| Command::PlayCard {
            side,
            card,
            lane,
            reply,
        })
        .await?
    }

    /// Queue an enemy card into its closest free wait lane.
    pub async fn reserve_enemy_slot(&self, card: CardInstanceId) -> Result<Option<CombatLane>> {
        self.request(|reply| Command::ReserveEnemySlot { card, reply }).await?
    }

    pub async fn register_guard(&self) -> Result<bool> {
        self.request(|reply| Command::RegisterGuard { reply }).await?
    }

    pub async fn discard_card(&self, side: Side, card: CardInstanceId) -> Result<bool> {
        self.request(|reply| Command::DiscardCard { side, card, reply }).await?
    }

    pub async fn enqueue_execution(&self, position: SlotPosition, owner: Side) -> Result<()> {
        self.request(|reply| Command::EnqueueExecution {
            position,
            owner,
            reply,
        })
        .await?
    }

    pub async fn begin_resolution(&self) -> Result<()> {
        self.request(|reply| Command::BeginResolution { reply }).await?
    }

    /// Drain the execution queue.
    pub async fn process_queue(&self) -> Result<QueueReport> {
        self.request(|reply| Command::ProcessQueue { reply }).await?
    }

    pub async fn complete_turn(&self) -> Result<u32> {
        self.request(|reply| Command::CompleteTurn { reply }).await?
    }

    pub async fn pause(&self) -> Result<()> {
        self.request(|reply| Command::Pause { reply }).await?
    }

    pub async fn resume(&self) -> Result<()> {
        self.request(|reply| Command::Resume { reply }).await?
    }

    pub async fn end_session(&self) -> Result<()> {
        self.request(|reply| Command::EndSession { reply }).await?
    }

    /// Save a snapshot of the current session. Returns the turn it is keyed by.
    pub async fn save_snapshot(&self) -> Result<u32> {
        self.request(|reply| Command::SaveSnapshot { reply }).await?
    }

    /// Replace the session with the snapshot saved at `turn`.
    pub async fn restore_snapshot(&self, turn: u32) -> Result<()> {
        self.request(|reply| Command::RestoreSnapshot { turn, reply }).await?
    }

    /// Query the current session (read-only copy)
    pub async fn query_session(&self) -> Result<CombatSession> {
        self.request(|reply| Command::QuerySession { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Combat` - Every event of the combat outbox
    /// - `Topic::Turn` - Turn boundaries
    /// - `Topic::Persistence` - Snapshot saves and restores
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use battle_runtime::Topic;
    ///
    /// let mut turn_rx = handle.subscribe(Topic::Turn);
    /// while let Ok(event) = turn_rx.recv().await {
    ///     // Handle turn boundaries
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
