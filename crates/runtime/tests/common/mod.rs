#![allow(dead_code)]

use battle_core::{
    CardDefinition, CardEffect, CardId, CombatConfig, CombatSession, CombatantTemplate,
    ContentCatalog, EnemyId, EnemyTemplate, PcgRng, Recipient, StageDefinition, StageId,
    StageOracle, TurnEffectKind,
};
use battle_runtime::OracleManager;

pub const STRIKE: CardId = CardId(1);
pub const HEX: CardId = CardId(2);
pub const RAT: EnemyId = EnemyId(10);
pub const SEWER: StageId = StageId(1);

/// Two cards, one enemy kind, one stage with two rats.
///
/// Rats have 6 HP and strike for 5, so each one dies to the player's
/// second strike. A hexed rat dies at the start of its next turn.
pub fn catalog() -> ContentCatalog {
    ContentCatalog::new()
        .with_card(CardDefinition::new(STRIKE, "Strike").with_effect(CardEffect::damage(5)))
        .with_card(CardDefinition::new(HEX, "Hex").with_effect(CardEffect::turn_effect(
            TurnEffectKind::Damage,
            6,
            2,
            Recipient::Target,
        )))
        .with_enemy(
            EnemyTemplate::new(
                RAT,
                CombatantTemplate::new("Rat", 6).with_deck(vec![STRIKE; 3]),
            )
            .with_reward(5),
        )
        .with_stage(StageDefinition::new(SEWER, "Sewer", vec![RAT, RAT]))
}

pub fn player() -> CombatantTemplate {
    CombatantTemplate::new("Hero", 30).with_deck(vec![STRIKE; 6])
}

pub fn oracles() -> OracleManager {
    OracleManager::from(catalog())
}

/// A fresh session built outside the runtime, for repository tests.
pub fn session(seed: u64) -> CombatSession {
    let catalog = catalog();
    let rng = PcgRng;
    let env = battle_core::CombatEnv::from_catalog(&catalog, &rng);
    let stage = catalog.stage(SEWER).expect("fixture stage");
    let mut session =
        CombatSession::new(CombatConfig::default(), seed, &player(), &stage, &env).unwrap();
    session.start_combat(&env).unwrap();
    session
}
