mod common;

use std::sync::Arc;

use battle_core::{
    CombatError, CombatEvent, CombatLane, CombatPhase, CombatantTemplate, ProgressState, Side,
    TurnError,
};
use battle_runtime::{
    Event, FirstPlayableProvider, InMemorySnapshotRepository, PassProvider, PersistenceEvent,
    ProviderKind, Runtime, RuntimeError, SnapshotRepository, Topic, TurnEvent,
};

use common::{HEX, RAT, SEWER, oracles, player};

async fn runtime() -> Runtime {
    Runtime::builder()
        .oracles(oracles())
        .player(player())
        .stage(SEWER)
        .seed(7)
        .player_provider(FirstPlayableProvider)
        .enemy_provider(FirstPlayableProvider)
        .build()
        .await
        .expect("runtime should build")
}

#[tokio::test]
async fn first_step_starts_combat_and_plays_the_player_turn() {
    let runtime = runtime().await;
    let mut combat = runtime.subscribe(Topic::Combat);

    let summary = runtime.step().await.unwrap();
    assert_eq!(summary.number, 1);
    assert_eq!(summary.side, Side::Player);
    assert!(summary.play.is_some_and(|play| play.is_played()));
    assert_eq!(summary.report.resolutions.len(), 1);
    assert_eq!(summary.report.empty_slots, 1);

    match combat.recv().await.unwrap() {
        Event::Combat(CombatEvent::PhaseChanged { from, to }) => {
            assert_eq!(from, CombatPhase::None);
            assert_eq!(to, CombatPhase::Preparation);
        }
        other => panic!("unexpected first event: {:?}", other),
    }

    let session = runtime.handle().query_session().await.unwrap();
    assert_eq!(session.current_enemy(), Some(RAT));
    assert_eq!(session.enemy().map(|enemy| enemy.current_health()), Some(1));
    assert!(session.current_turn().is_some_and(|turn| turn.is_completed()));
}

#[tokio::test]
async fn enemy_killed_at_its_turn_start_plays_nothing() {
    let runtime = Runtime::builder()
        .oracles(oracles())
        .player(CombatantTemplate::new("Hexer", 30).with_deck(vec![HEX; 6]))
        .stage(SEWER)
        .player_provider(FirstPlayableProvider)
        .enemy_provider(FirstPlayableProvider)
        .build()
        .await
        .unwrap();

    runtime.step().await.unwrap();
    let summary = runtime.step().await.unwrap();
    assert_eq!(summary.number, 2);
    assert_eq!(summary.side, Side::Enemy);
    assert_eq!(summary.intent, None);
    assert!(summary.play.is_none());
    assert_eq!(summary.phase, CombatPhase::EnemyTurn);

    let session = runtime.handle().query_session().await.unwrap();
    assert!(session.enemy().is_none());
    assert_eq!(session.pending_enemy(), Some(RAT));
    assert_eq!(session.rewards(), 5);
    assert!(session.cards(Side::Enemy).hand().as_slice().is_empty());

    let summary = runtime.step().await.unwrap();
    assert_eq!(summary.side, Side::Player);
    let session = runtime.handle().query_session().await.unwrap();
    assert_eq!(session.enemy().map(|enemy| enemy.current_health()), Some(6));
    assert_eq!(session.cards(Side::Enemy).hand().as_slice().len(), 3);
}

#[tokio::test]
async fn run_clears_the_stage() {
    let runtime = runtime().await;
    let mut turns = runtime.subscribe(Topic::Turn);

    let phase = runtime.run(20).await.unwrap();
    assert_eq!(phase, CombatPhase::Victory);

    let session = runtime.handle().query_session().await.unwrap();
    assert_eq!(session.current_turn_number(), 7);
    assert_eq!(session.rewards(), 10);
    assert_eq!(session.stage().state(), ProgressState::Completed);
    assert_eq!(session.player().current_health(), 15);

    assert!(matches!(
        turns.recv().await.unwrap(),
        Event::Turn(TurnEvent::Started {
            number: 1,
            side: Side::Player
        })
    ));

    assert!(matches!(
        runtime.step().await,
        Err(RuntimeError::SessionFinished)
    ));
}

#[tokio::test]
async fn step_requires_a_provider_for_the_acting_side() {
    let runtime = Runtime::builder()
        .oracles(oracles())
        .player(player())
        .player_provider(PassProvider)
        .build()
        .await
        .unwrap();

    let summary = runtime.step().await.unwrap();
    assert!(summary.intent.is_none());
    assert!(summary.report.resolutions.is_empty());

    match runtime.step().await {
        Err(RuntimeError::ProviderNotSet { kind }) => assert_eq!(kind, ProviderKind::Enemy),
        other => panic!("expected missing provider, got {:?}", other.map(|s| s.number)),
    }

    // Nothing was started for the enemy.
    let session = runtime.handle().query_session().await.unwrap();
    assert_eq!(session.current_turn_number(), 1);
}

#[tokio::test]
async fn handle_surfaces_engine_errors() {
    let runtime = runtime().await;
    let handle = runtime.handle();

    handle.start_combat().await.unwrap();
    handle.start_turn(Side::Player).await.unwrap();

    let session = handle.query_session().await.unwrap();
    let card = session.cards(Side::Enemy).hand().as_slice()[0];

    match handle.play_card(Side::Enemy, card, CombatLane::Battle).await {
        Err(RuntimeError::Combat(CombatError::Turn(TurnError::NotActingSide {
            expected,
            actual,
        }))) => {
            assert_eq!(expected, Side::Player);
            assert_eq!(actual, Side::Enemy);
        }
        other => panic!("expected NotActingSide, got {:?}", other),
    }

    // Enemy intents can still be telegraphed during the player's turn.
    assert_eq!(
        handle.reserve_enemy_slot(card).await.unwrap(),
        Some(CombatLane::Wait1)
    );
}

#[tokio::test]
async fn pause_blocks_turns_until_resumed() {
    let runtime = runtime().await;
    let handle = runtime.handle();
    handle.start_combat().await.unwrap();

    handle.pause().await.unwrap();
    assert!(matches!(
        handle.start_turn(Side::Player).await,
        Err(RuntimeError::Combat(CombatError::Turn(TurnError::Paused)))
    ));

    handle.resume().await.unwrap();
    assert_eq!(handle.start_turn(Side::Player).await.unwrap(), 1);

    handle.end_session().await.unwrap();
    assert_eq!(
        handle.query_session().await.unwrap().phase(),
        CombatPhase::Ended
    );
}

#[tokio::test]
async fn autosave_snapshots_every_completed_turn() {
    let repository = Arc::new(InMemorySnapshotRepository::new());
    let runtime = Runtime::builder()
        .oracles(oracles())
        .player(player())
        .seed(7)
        .repository(repository.clone())
        .autosave(true)
        .player_provider(FirstPlayableProvider)
        .enemy_provider(FirstPlayableProvider)
        .build()
        .await
        .unwrap();
    let mut persistence = runtime.subscribe(Topic::Persistence);

    runtime.step().await.unwrap();
    runtime.step().await.unwrap();

    assert_eq!(repository.list_turns().unwrap(), vec![1, 2]);
    assert!(matches!(
        persistence.recv().await.unwrap(),
        Event::Persistence(PersistenceEvent::SnapshotSaved { turn: 1 })
    ));

    let handle = runtime.handle();
    handle.restore_snapshot(1).await.unwrap();

    let session = handle.query_session().await.unwrap();
    assert_eq!(session.current_turn_number(), 1);
    assert_eq!(session.player().current_health(), 30);
    assert_eq!(session.enemy().map(|enemy| enemy.current_health()), Some(1));

    assert!(matches!(
        handle.restore_snapshot(9).await,
        Err(RuntimeError::SnapshotNotFound { turn: 9 })
    ));
}

#[tokio::test]
async fn snapshot_commands_need_a_repository() {
    let runtime = runtime().await;
    assert!(matches!(
        runtime.handle().save_snapshot().await,
        Err(RuntimeError::RepositoryNotSet)
    ));
}

#[tokio::test]
async fn build_reports_missing_inputs() {
    assert!(matches!(
        Runtime::builder().build().await,
        Err(RuntimeError::MissingOracles)
    ));
    assert!(matches!(
        Runtime::builder().oracles(oracles()).build().await,
        Err(RuntimeError::MissingPlayer)
    ));
    assert!(matches!(
        Runtime::builder()
            .oracles(oracles())
            .player(player())
            .stage(battle_core::StageId(99))
            .build()
            .await,
        Err(RuntimeError::UnknownStage(_))
    ));
}

#[tokio::test]
async fn same_seed_same_fight() {
    let a = runtime().await;
    let b = runtime().await;
    a.run(20).await.unwrap();
    b.run(20).await.unwrap();

    let a = a.handle().query_session().await.unwrap();
    let b = b.handle().query_session().await.unwrap();
    assert_eq!(a.snapshot(), b.snapshot());
}

#[tokio::test]
async fn shutdown_joins_the_worker() {
    battle_runtime::logging::init();
    let runtime = runtime().await;
    runtime.step().await.unwrap();
    runtime.shutdown().await.unwrap();
}
