use std::fs;
use std::path::{Path, PathBuf};

use battle_content::ContentFactory;
use battle_core::{CardId, CardOracle, CombatConfig, EnemyId, EnemyOracle, StageId, StageOracle};

fn bundled_data() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

fn write_content(dir: &Path, stages: &str) {
    fs::write(
        dir.join("cards.ron"),
        r#"(cards: [(id: 1, name: "Strike", effects: [(kind: Damage(ignore_guard: false), power: 4)])])"#,
    )
    .unwrap();
    fs::write(
        dir.join("enemies.ron"),
        r#"(enemies: [(id: 1, name: "Rat", max_health: 5, deck: [1])])"#,
    )
    .unwrap();
    fs::write(dir.join("stages.ron"), stages).unwrap();
    fs::write(
        dir.join("player.ron"),
        r#"(name: "Hero", max_health: 20, deck: [1, 1])"#,
    )
    .unwrap();
}

#[test]
fn bundled_data_loads_and_validates() {
    let content = ContentFactory::new(bundled_data())
        .load()
        .expect("bundled content is valid");

    assert_eq!(content.config, CombatConfig::default());
    assert_eq!(content.player.name, "Warden");
    assert!(content.catalog.card(CardId(5)).is_some());
    assert_eq!(
        content.catalog.enemy(EnemyId(2)).map(|enemy| enemy.reward),
        Some(8)
    );
    assert_eq!(
        content
            .catalog
            .stage(StageId(1))
            .map(|stage| stage.enemies.len()),
        Some(3)
    );
}

#[test]
fn missing_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write_content(dir.path(), r#"(stages: [(id: 1, name: "Den", enemies: [1])])"#);

    let content = ContentFactory::new(dir.path()).load().unwrap();
    assert_eq!(content.config, CombatConfig::default());
    assert_eq!(content.player.deck, vec![CardId(1), CardId(1)]);
}

#[test]
fn dangling_stage_enemy_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_content(dir.path(), r#"(stages: [(id: 1, name: "Den", enemies: [1, 4])])"#);

    let err = ContentFactory::new(dir.path()).load().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Invalid content"));
    assert!(message.contains("enemy#4"));
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = ContentFactory::new(dir.path()).load().unwrap_err();
    assert!(err.to_string().contains("player.ron"));
}
