//! Persistence across reopen, legacy migration and import/export.

use kanban_store::storage::keys;
use kanban_store::{Board, FileStore, KeyValueStore, MemoryStore, StoreError};
use tempfile::TempDir;

#[test]
fn test_board_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");

    let (task_id, column_id) = {
        let mut board = Board::open(FileStore::open(&path).unwrap()).unwrap();
        let task_id = board.create_task("work", "in-progress").unwrap().unwrap();
        board.edit_task_content(&task_id, "Ship release").unwrap();
        board.add_tag(&task_id, "release").unwrap();
        let column_id = board.add_column("work", "Code Review").unwrap().unwrap();
        board.create_idea("Retro notes", "work").unwrap();
        board.toggle_theme().unwrap();
        (task_id, column_id)
    };

    let mut board = Board::open(FileStore::open(&path).unwrap()).unwrap();
    let task = board.task(&task_id).unwrap();
    assert_eq!(task.content, "Ship release");
    assert_eq!(task.tags, ["release"]);
    assert!(board.columns_for("work").contains(&column_id));
    assert_eq!(board.column_display_name(&column_id), "Code Review");
    assert_eq!(board.ideas_for("work").len(), 1);
    assert_eq!(board.theme(), kanban_shared::Theme::Light);

    // counters keep ids unique after reload
    let next = board.create_task("work", "done").unwrap().unwrap();
    assert_eq!(next, "task-2");
    let next_idea = board.create_idea("More", "work").unwrap().unwrap();
    assert_eq!(next_idea, "idea-2");
}

#[test]
fn test_legacy_keys_migrated_on_open() {
    let mut storage = MemoryStore::default();
    let legacy_tasks = r#"{
        "task-3": {
            "id": "task-3",
            "content": "From the old days",
            "category": "personal",
            "column": "waiting",
            "createdAt": "2023-05-01T08:00:00.000Z",
            "updatedAt": "2023-05-01T08:00:00.000Z"
        }
    }"#;
    storage.set("sara-tasks", legacy_tasks).unwrap();
    storage.set("sara-task-counter", "4").unwrap();
    storage.set(keys::THEME, "light").unwrap();

    let board = Board::open(storage).unwrap();

    assert_eq!(board.task("task-3").unwrap().content, "From the old days");
    assert_eq!(board.state().task_counter, 4);
    assert_eq!(board.storage().get("sara-tasks").unwrap(), None);
    assert!(board.storage().get(keys::TASKS).unwrap().is_some());
    assert_eq!(board.storage().get(keys::THEME).unwrap().as_deref(), Some("light"));
}

#[test]
fn test_export_import_round_trip() {
    let mut source = Board::open(MemoryStore::default()).unwrap();
    let a = source.create_task("personal", "on-the-table").unwrap().unwrap();
    let b = source.create_task("personal", "waiting").unwrap().unwrap();
    source.add_subtask(&a, "Step one").unwrap();
    source.add_comment(&a, "Looks good").unwrap();
    source.add_dependency(&a, &b).unwrap();
    source.add_column("work", "Blocked").unwrap();
    source.create_idea("Someday", "work").unwrap();
    source.switch_category("work");

    let json = source.export_json().unwrap();

    let mut target = Board::open(MemoryStore::default()).unwrap();
    target.import(&json).unwrap();

    assert_eq!(target.state(), source.state());
    assert_eq!(target.current_category(), "work");
    assert!(target.state().task_counter >= source.state().task_counter);
}

#[test]
fn test_invalid_import_reports_error() {
    let mut board = Board::open(MemoryStore::default()).unwrap();
    board.create_task("personal", "waiting").unwrap();
    let before = board.state().clone();

    let err = board.import(r#"{"ideas": {}}"#).unwrap_err();
    assert!(matches!(err, StoreError::InvalidImport(_)));
    assert_eq!(board.state(), &before);
}
