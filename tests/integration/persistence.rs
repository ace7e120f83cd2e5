//! Integration tests for file-backed persistence across store instances.
//!
//! The on-disk contract: a single `tasks.json` file holding a JSON array of
//! task records with camelCase keys, rewritten wholesale on every mutation.
//! Corrupt or absent data is absorbed to an empty collection, never an
//! error.

use std::path::Path;

use taskdeck_core::{
    FileKvStore, Priority, TaskDraft, TaskPatch, TaskStore, TaskVault,
};
use tempfile::TempDir;

fn open_store(dir: &Path) -> TaskStore {
    TaskStore::open(TaskVault::new(Box::new(FileKvStore::new(dir))))
}

fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        ..TaskDraft::default()
    }
}

#[test]
fn tasks_survive_a_restart() {
    let dir = TempDir::new().unwrap();

    let mut store = open_store(dir.path());
    store.create(draft("first"));
    let id = store.create(draft("second"));
    store.toggle(&id);
    drop(store);

    let reopened = open_store(dir.path());
    let titles: Vec<&str> = reopened.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["second", "first"]);
    assert!(reopened.tasks()[0].completed);
    assert!(!reopened.tasks()[1].completed);
}

#[test]
fn fresh_directory_opens_empty() {
    let dir = TempDir::new().unwrap();
    let store = open_store(dir.path());
    assert!(store.tasks().is_empty());
}

#[test]
fn corrupt_stored_data_recovers_to_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tasks.json"), "}{ definitely broken").unwrap();

    let mut store = open_store(dir.path());
    assert!(store.tasks().is_empty());

    // The next mutation overwrites the corrupt value with a clean state.
    store.create(draft("recovered"));
    drop(store);

    let reopened = open_store(dir.path());
    assert_eq!(reopened.tasks().len(), 1);
    assert_eq!(reopened.tasks()[0].title, "recovered");
}

#[test]
fn stored_value_is_a_camel_case_json_array() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(dir.path());
    store.create(TaskDraft {
        title: "wire check".to_string(),
        priority: Priority::High,
        tags: vec!["work".to_string()],
        ..TaskDraft::default()
    });

    let raw = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);

    let record = records[0].as_object().unwrap();
    assert_eq!(record["title"], "wire check");
    assert_eq!(record["priority"], "high");
    assert_eq!(record["completed"], false);
    assert!(record.contains_key("createdAt"));
    assert!(record.contains_key("updatedAt"));
    // Optional fields are omitted, not null.
    assert!(!record.contains_key("description"));
    assert!(!record.contains_key("dueDate"));
}

#[test]
fn every_mutation_replaces_the_whole_collection() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(dir.path());
    let keep = store.create(draft("keep"));
    let remove = store.create(draft("remove"));

    store.update(
        &keep,
        TaskPatch {
            title: Some("kept".to_string()),
            updated_at: Some(chrono::Utc::now()),
            ..TaskPatch::default()
        },
    );
    store.delete(&remove);

    let raw = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["title"], "kept");
}

#[test]
fn last_writer_wins_across_concurrent_stores() {
    let dir = TempDir::new().unwrap();

    // Two sessions over the same directory, each unaware of the other.
    let mut session_a = open_store(dir.path());
    let mut session_b = open_store(dir.path());

    session_a.create(draft("from a"));
    session_b.create(draft("from b"));

    // No cross-session merge: whoever wrote last owns the stored state.
    let reopened = open_store(dir.path());
    assert_eq!(reopened.tasks().len(), 1);
    assert_eq!(reopened.tasks()[0].title, "from b");
}

#[test]
fn deleting_everything_persists_an_empty_array() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(dir.path());
    let id = store.create(draft("fleeting"));
    store.delete(&id);
    drop(store);

    let raw = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    assert_eq!(raw, "[]");

    let reopened = open_store(dir.path());
    assert!(reopened.tasks().is_empty());
}
