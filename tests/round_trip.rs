//! Storage round-trip tests: pins written by `persist` must come back
//! identical through `restore` and `load_board`.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use pinmap::io::board_io::load_board;
use pinmap::io::storage::{persist, pins_path, restore};
use pinmap::model::pin::Pin;
use pinmap::store::PinStore;

fn sample_pins() -> Vec<Pin> {
    vec![
        Pin {
            id: "a1".into(),
            lat: 35.6812,
            lng: 139.7671,
            title: "Tokyo Station".into(),
            description: "meet at the north gate".into(),
            created_at: "2025-05-01T09:00:00Z".parse().unwrap(),
            updated_at: Some("2025-05-02T10:30:00Z".parse().unwrap()),
        },
        Pin {
            id: "b2".into(),
            lat: -33.8568,
            lng: 151.2153,
            title: "Opera House".into(),
            description: String::new(),
            created_at: "2025-05-03T12:00:00Z".parse().unwrap(),
            updated_at: None,
        },
        Pin {
            id: "c3".into(),
            lat: 64.1466,
            lng: -21.9426,
            title: "Reykjav\u{ed}k \u{2600}".into(),
            description: "unicode survives \u{65e5}\u{672c}\u{8a9e}".into(),
            created_at: "2025-05-04T23:59:59Z".parse().unwrap(),
            updated_at: None,
        },
    ]
}

fn write_board_toml(root: &Path) {
    let board_dir = root.join("pinboard");
    fs::create_dir_all(&board_dir).unwrap();
    fs::write(
        board_dir.join("board.toml"),
        "[board]\nname = \"round-trip\"\n",
    )
    .unwrap();
}

#[test]
fn persist_restore_is_identity() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = pins_path(tmp.path());
    let pins = sample_pins();
    let refs: Vec<&Pin> = pins.iter().collect();

    persist(&path, &refs).unwrap();
    let restored = restore(&path).unwrap();

    assert_eq!(restored, pins);
}

#[test]
fn load_board_round_trips_through_store() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_board_toml(tmp.path());
    let pins = sample_pins();
    let refs: Vec<&Pin> = pins.iter().collect();
    persist(&pins_path(&tmp.path().join("pinboard")), &refs).unwrap();

    let board = load_board(tmp.path()).unwrap();
    assert!(board.storage_warning.is_none());
    assert_eq!(board.store.all().len(), 3);
    assert_eq!(board.store.get("a1").unwrap(), &pins[0]);
    assert_eq!(board.store.get("c3").unwrap().title, "Reykjav\u{ed}k \u{2600}");
}

#[test]
fn reordered_store_persists_list_order() {
    // The persisted file carries list() order: newest first, id tiebreak
    let tmp = tempfile::TempDir::new().unwrap();
    let path = pins_path(tmp.path());
    let store = PinStore::from_pins(sample_pins());

    persist(&path, &store.list()).unwrap();
    let restored = restore(&path).unwrap();

    let ids: Vec<&str> = restored.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["c3", "b2", "a1"]);
}

#[test]
fn timestamps_survive_with_second_precision() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = pins_path(tmp.path());
    let pins = sample_pins();
    let refs: Vec<&Pin> = pins.iter().collect();

    persist(&path, &refs).unwrap();
    let restored = restore(&path).unwrap();

    assert_eq!(restored[0].created_at, pins[0].created_at);
    assert_eq!(restored[0].updated_at, pins[0].updated_at);
}

#[test]
fn empty_store_persists_as_empty_array() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = pins_path(tmp.path());

    persist(&path, &[]).unwrap();
    let raw = fs::read_to_string(&path).unwrap();
    assert_eq!(raw.trim(), "[]");
    assert_eq!(restore(&path).unwrap(), Vec::<Pin>::new());
}
