//! Integration tests for the CLI command layer.
//!
//! These drive the command functions against real snapshot files in a
//! temporary directory, covering the full load -> compute -> apply -> save
//! round trip that the binary performs.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use ordex::cli::{cmd_check, cmd_init, cmd_move, cmd_remove, cmd_show, load_snapshot, save_snapshot};
use ordex_core::{OrdexError, Position, Record, RecordId};
use std::path::PathBuf;
use tempfile::TempDir;

fn temp_snapshot(dir: &TempDir, name: &str, records: &[Record]) -> PathBuf {
    let path = dir.path().join(name);
    save_snapshot(&path, "json", records).expect("save");
    path
}

fn records(entries: &[(u64, Option<u64>)]) -> Vec<Record> {
    entries
        .iter()
        .map(|&(id, pos)| Record {
            id: RecordId(id),
            position: pos.map(Position::new),
        })
        .collect()
}

// =============================================================================
// INIT
// =============================================================================

#[test]
fn init_creates_dense_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.json");

    cmd_init(&path, "json", false, 5).expect("init");

    let loaded = load_snapshot(&path, "json").expect("load");
    assert_eq!(loaded.len(), 5);
    for (i, record) in loaded.iter().enumerate() {
        assert_eq!(record.position, Some(Position::new(i as u64)));
    }
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let path = temp_snapshot(&dir, "records.json", &records(&[(1, Some(0))]));

    let result = cmd_init(&path, "json", false, 3);
    assert!(matches!(result, Err(OrdexError::IoError(_))));

    // --force replaces the snapshot
    cmd_init(&path, "json", true, 3).expect("forced init");
    assert_eq!(load_snapshot(&path, "json").expect("load").len(), 3);
}

// =============================================================================
// MOVE
// =============================================================================

#[test]
fn move_write_applies_mapping_to_file() {
    let dir = TempDir::new().unwrap();
    let path = temp_snapshot(
        &dir,
        "records.json",
        &records(&[(10, Some(0)), (20, Some(1)), (30, Some(2))]),
    );

    cmd_move(&path, "json", false, 10, 2, true).expect("move");

    let updated = load_snapshot(&path, "json").expect("load");
    let by_id = |id: u64| {
        updated
            .iter()
            .find(|r| r.id == RecordId(id))
            .unwrap()
            .position
    };
    assert_eq!(by_id(20), Some(Position::new(0)));
    assert_eq!(by_id(30), Some(Position::new(1)));
    assert_eq!(by_id(10), Some(Position::new(2)));
}

#[test]
fn move_without_write_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let original = records(&[(1, Some(0)), (2, Some(1))]);
    let path = temp_snapshot(&dir, "records.json", &original);

    cmd_move(&path, "json", false, 1, 5, false).expect("move");

    assert_eq!(load_snapshot(&path, "json").expect("load"), original);
}

#[test]
fn move_unknown_record_fails() {
    let dir = TempDir::new().unwrap();
    let path = temp_snapshot(&dir, "records.json", &records(&[(1, Some(0))]));

    let result = cmd_move(&path, "json", false, 99, 0, false);
    assert!(matches!(result, Err(OrdexError::RecordNotFound(_))));
}

// =============================================================================
// REMOVE
// =============================================================================

#[test]
fn remove_write_drops_record_and_densifies() {
    let dir = TempDir::new().unwrap();
    let path = temp_snapshot(
        &dir,
        "records.json",
        &records(&[(1, Some(0)), (2, Some(1)), (3, Some(2))]),
    );

    cmd_remove(&path, "json", false, 2, true).expect("remove");

    let updated = load_snapshot(&path, "json").expect("load");
    assert_eq!(updated.len(), 2);
    assert!(updated.iter().all(|r| r.id != RecordId(2)));

    let positions: Vec<Option<Position>> = updated.iter().map(|r| r.position).collect();
    assert_eq!(
        positions,
        vec![Some(Position::new(0)), Some(Position::new(1))]
    );
}

// =============================================================================
// SHOW / CHECK
// =============================================================================

#[test]
fn show_and_check_accept_messy_snapshots() {
    let dir = TempDir::new().unwrap();
    let path = temp_snapshot(
        &dir,
        "records.json",
        &records(&[(1, None), (2, Some(7)), (3, Some(7))]),
    );

    cmd_show(&path, "json", true).expect("show");
    cmd_check(&path, "json", true).expect("check");
}

#[test]
fn check_rejects_duplicate_identities() {
    let dir = TempDir::new().unwrap();
    let path = temp_snapshot(
        &dir,
        "records.json",
        &records(&[(1, Some(0)), (1, Some(1))]),
    );

    let result = cmd_check(&path, "json", false);
    assert!(matches!(result, Err(OrdexError::DuplicateIdentity(_))));
}

// =============================================================================
// FORMATS
// =============================================================================

#[test]
fn text_format_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.txt");
    let original = records(&[(1, Some(2)), (2, None), (3, Some(0))]);

    save_snapshot(&path, "text", &original).expect("save");
    let loaded = load_snapshot(&path, "text").expect("load");
    assert_eq!(loaded, original);
}

#[test]
fn text_format_move_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.txt");
    save_snapshot(&path, "text", &records(&[(5, Some(0)), (6, Some(1))])).expect("save");

    cmd_move(&path, "text", false, 6, 0, true).expect("move");

    let updated = load_snapshot(&path, "text").expect("load");
    let by_id = |id: u64| {
        updated
            .iter()
            .find(|r| r.id == RecordId(id))
            .unwrap()
            .position
    };
    assert_eq!(by_id(6), Some(Position::new(0)));
    assert_eq!(by_id(5), Some(Position::new(1)));
}

#[test]
fn unknown_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = temp_snapshot(&dir, "records.json", &records(&[(1, Some(0))]));

    let result = load_snapshot(&path, "yaml");
    assert!(matches!(result, Err(OrdexError::SerializationError(_))));
}

#[test]
fn malformed_text_line_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.txt");
    std::fs::write(&path, "1:0\nnot-a-record\n").unwrap();

    let result = load_snapshot(&path, "text");
    assert!(matches!(result, Err(OrdexError::SerializationError(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    let result = load_snapshot(&path, "json");
    assert!(matches!(result, Err(OrdexError::IoError(_))));
}
