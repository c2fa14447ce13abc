//! Asynchronous abstraction for sourcing card intents.
//!
//! Card *selection* is not part of the combat rules. Runtime users plug in
//! [`IntentProvider`] implementations so a side can be driven by human input,
//! scripted fixtures, or a simple policy.
use async_trait::async_trait;
use battle_core::{CardInstanceId, CombatLane, CombatSession, Side, SlotPosition};

use super::errors::Result;

/// A card to play and the lane to play it into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardIntent {
    pub card: CardInstanceId,
    pub lane: CombatLane,
}

/// Trait for choosing which card a side plays this turn.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Enemy card selection
/// - Scripted/replayed intents
/// - Testing fixtures
#[async_trait]
pub trait IntentProvider: Send + Sync {
    /// Chooses a card for `side` from a read-only copy of the session.
    ///
    /// `None` passes the turn without playing a card.
    async fn provide_intent(
        &self,
        side: Side,
        session: &CombatSession,
    ) -> Result<Option<CardIntent>>;
}

/// Plays the first hand card that is off cooldown and affordable.
///
/// Prefers the battle lane and falls back to the closest free wait lane.
pub struct FirstPlayableProvider;

#[async_trait]
impl IntentProvider for FirstPlayableProvider {
    async fn provide_intent(
        &self,
        side: Side,
        session: &CombatSession,
    ) -> Result<Option<CardIntent>> {
        let Some(lane) = free_lane(session, side) else {
            return Ok(None);
        };
        let available = session
            .character(side)
            .and_then(|character| character.resource())
            .map(|resource| resource.current_amount());

        let zones = session.cards(side);
        let card = zones.hand().as_slice().iter().copied().find(|&id| {
            zones
                .get(id)
                .is_some_and(|card| card.check_playable(available).is_ok())
        });
        Ok(card.map(|card| CardIntent { card, lane }))
    }
}

/// A provider that never plays a card.
/// Useful for testing or as a fallback.
pub struct PassProvider;

#[async_trait]
impl IntentProvider for PassProvider {
    async fn provide_intent(
        &self,
        _side: Side,
        _session: &CombatSession,
    ) -> Result<Option<CardIntent>> {
        Ok(None)
    }
}

fn free_lane(session: &CombatSession, side: Side) -> Option<CombatLane> {
    let battle = SlotPosition::combat(side, CombatLane::Battle);
    if !session.slots().is_occupied(battle) {
        return Some(CombatLane::Battle);
    }
    session.slots().first_free_wait_lane(side)
}

#[cfg(test)]
mod tests {
    use battle_core::{
        CardDefinition, CardEffect, CardId, CombatConfig, CombatEnv, CombatantTemplate,
        ContentCatalog, EnemyId, EnemyTemplate, PcgRng, StageDefinition, StageId,
    };

    use super::*;

    fn started_session() -> CombatSession {
        let catalog = ContentCatalog::new()
            .with_card(
                CardDefinition::new(CardId(1), "Jab").with_effect(CardEffect::damage(1)),
            )
            .with_card(
                CardDefinition::new(CardId(2), "Haymaker")
                    .with_cost(3)
                    .with_effect(CardEffect::damage(9)),
            )
            .with_enemy(EnemyTemplate::new(
                EnemyId(1),
                CombatantTemplate::new("Dummy", 50).with_deck(vec![CardId(1); 4]),
            ));
        let rng = PcgRng;
        let env = CombatEnv::from_catalog(&catalog, &rng);
        let stage = StageDefinition::new(StageId(1), "Yard", vec![EnemyId(1)]);
        let player = CombatantTemplate::new("Hero", 20).with_deck(vec![CardId(2), CardId(1)]);

        let mut session =
            CombatSession::new(CombatConfig::default(), 3, &player, &stage, &env).unwrap();
        session.start_combat(&env).unwrap();
        session.start_next_turn(Side::Player).unwrap();
        session
    }

    #[tokio::test]
    async fn skips_unaffordable_cards() {
        let session = started_session();
        let intent = FirstPlayableProvider
            .provide_intent(Side::Player, &session)
            .await
            .unwrap()
            .expect("the jab is playable");

        let card = session.cards(Side::Player).get(intent.card).unwrap();
        assert_eq!(card.card_id(), CardId(1));
        assert_eq!(intent.lane, CombatLane::Battle);
    }

    #[tokio::test]
    async fn passes_when_nothing_is_affordable() {
        let mut session = started_session();
        let jab = FirstPlayableProvider
            .provide_intent(Side::Player, &session)
            .await
            .unwrap()
            .unwrap();
        session.play_card(Side::Player, jab.card, jab.lane).unwrap();

        // Only the haymaker is left and the hero has no resource pool.
        let intent = FirstPlayableProvider
            .provide_intent(Side::Player, &session)
            .await
            .unwrap();
        assert_eq!(intent, None);
        assert_eq!(free_lane(&session, Side::Player), Some(CombatLane::Wait1));
    }

    #[tokio::test]
    async fn pass_provider_never_plays() {
        let session = started_session();
        for side in [Side::Player, Side::Enemy] {
            assert_eq!(PassProvider.provide_intent(side, &session).await.unwrap(), None);
        }
    }
}
