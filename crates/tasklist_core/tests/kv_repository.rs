use tasklist_core::db::open_db_in_memory;
use tasklist_core::kv::{LISTS_KEY, TASKS_KEY, THEME_KEY};
use tasklist_core::{
    KeyValueStore, KvTaskRepository, RepoError, SqliteKvStore, Task, TaskList, TaskRepository,
    ThemeMode,
};

#[test]
fn missing_keys_load_as_empty_collections() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvTaskRepository::new(SqliteKvStore::new(&conn));

    assert!(repo.load_lists().unwrap().is_empty());
    assert!(repo.load_tasks().unwrap().is_empty());
    assert_eq!(repo.load_theme().unwrap(), ThemeMode::Light);
}

#[test]
fn collections_are_stored_as_json_arrays_under_well_known_keys() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    let repo = KvTaskRepository::new(&store);

    let list = TaskList::new("l-1", "Inbox", "2026-01-01T00:00:00.000Z");
    let task = Task::new("t-1", "l-1", "first", "2026-01-01T00:00:00.000Z");
    repo.save_lists(std::slice::from_ref(&list)).unwrap();
    repo.save_tasks(std::slice::from_ref(&task)).unwrap();
    repo.save_theme(ThemeMode::Dark).unwrap();

    let raw_lists = store.get(LISTS_KEY).unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw_lists).unwrap();
    assert_eq!(parsed[0]["name"], "Inbox");
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

    assert_eq!(repo.load_lists().unwrap(), vec![list]);
    assert_eq!(repo.load_tasks().unwrap(), vec![task]);
}

#[test]
fn corrupt_json_is_reported_with_its_key() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    store.set(TASKS_KEY, "{not json").unwrap();

    let repo = KvTaskRepository::new(&store);
    let err = repo.load_tasks().unwrap_err();
    match err {
        RepoError::InvalidData { key, .. } => assert_eq!(key, TASKS_KEY),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_theme_value_falls_back_to_default() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    store.set(THEME_KEY, "sepia").unwrap();

    let repo = KvTaskRepository::new(&store);
    assert_eq!(repo.load_theme().unwrap(), ThemeMode::Light);
}
