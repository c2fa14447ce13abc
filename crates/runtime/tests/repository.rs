mod common;

use std::fs;

use battle_core::{CombatSession, Side};
use battle_runtime::{
    FileSnapshotRepository, InMemorySnapshotRepository, RepositoryError, SnapshotRepository,
};
use tempfile::TempDir;

fn played_session() -> CombatSession {
    let mut session = common::session(11);
    session.start_next_turn(Side::Player).unwrap();
    session.complete_current_turn().unwrap();
    session
}

fn exercise(repository: &dyn SnapshotRepository) {
    let opening = common::session(11).snapshot();
    let later = played_session().snapshot();

    assert!(repository.latest().unwrap().is_none());

    repository.save(0, &opening).unwrap();
    repository.save(1, &later).unwrap();
    assert!(repository.exists(1));
    assert_eq!(repository.list_turns().unwrap(), vec![0, 1]);
    assert_eq!(repository.load(0).unwrap(), Some(opening.clone()));

    let (turn, latest) = repository.latest().unwrap().unwrap();
    assert_eq!(turn, 1);
    assert_eq!(latest, later);

    // Overwrites in place.
    repository.save(1, &opening).unwrap();
    assert_eq!(repository.load(1).unwrap(), Some(opening));

    assert_eq!(repository.delete_range(0, 5).unwrap(), 2);
    assert!(repository.list_turns().unwrap().is_empty());
    assert_eq!(repository.load(1).unwrap(), None);
}

#[test]
fn in_memory_repository_contract() {
    exercise(&InMemorySnapshotRepository::new());
}

#[test]
fn file_repository_contract() {
    let dir = TempDir::new().unwrap();
    let repository = FileSnapshotRepository::new(dir.path().join("saves")).unwrap();
    exercise(&repository);
}

#[test]
fn file_snapshot_restores_into_an_equal_session() {
    let dir = TempDir::new().unwrap();
    let repository = FileSnapshotRepository::new(dir.path()).unwrap();
    let session = played_session();

    repository.save(1, &session.snapshot()).unwrap();
    assert!(dir.path().join("snapshot_1.bin").exists());
    assert!(!dir.path().join("snapshot_1.bin.tmp").exists());

    let catalog = common::catalog();
    let restored =
        CombatSession::from_snapshot(repository.load(1).unwrap().unwrap(), &catalog).unwrap();
    assert_eq!(restored.snapshot(), session.snapshot());
}

#[test]
fn foreign_files_are_ignored_and_corrupt_files_fail() {
    let dir = TempDir::new().unwrap();
    let repository = FileSnapshotRepository::new(dir.path()).unwrap();

    fs::write(dir.path().join("notes.txt"), "not a snapshot").unwrap();
    fs::write(dir.path().join("snapshot_3.bin"), [0xff, 0x01]).unwrap();

    assert_eq!(repository.list_turns().unwrap(), vec![3]);
    assert!(matches!(
        repository.load(3),
        Err(RepositoryError::Serialization(_))
    ));
}
