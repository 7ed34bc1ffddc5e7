use notenest_core::db::migrations::latest_version;
use notenest_core::db::{open_db, DbError};
use notenest_core::{
    BlobStore, Capabilities, LoadOutcome, ManualClock, NotesConfig, NotesController,
    NotesRepository, SqliteBlobStore, StoreError,
};
use rusqlite::Connection;

#[test]
fn open_db_applies_migrations_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notenest.db");

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_blobs');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 42;").unwrap();
    drop(conn);

    match SqliteBlobStore::open(&path) {
        Err(StoreError::Db(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        })) => {
            assert_eq!(db_version, 42);
            assert_eq!(latest_supported, latest_version());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("newer schema must be rejected"),
    }
}

#[test]
fn notes_survive_reopening_the_store_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");
    let config = NotesConfig {
        load_delay_ms: 0,
        ..NotesConfig::default()
    };
    let clock = ManualClock::new(1_700_000_000_000);

    let created_id = {
        let store = SqliteBlobStore::open(&path).unwrap();
        let mut controller =
            NotesController::mount(store, clock.clone(), &Capabilities::editor(), config.clone());
        controller.tick();
        controller.open_create().unwrap();
        controller.set_form_title("Groceries").unwrap();
        controller.set_form_content("milk, eggs").unwrap();
        let id = controller.submit_form().unwrap().id;
        controller.stage_delete(1).unwrap();
        controller.confirm_delete().unwrap();
        controller.teardown();
        id
    };

    let repo = NotesRepository::new(SqliteBlobStore::open(&path).unwrap(), config.storage_key);
    let (notes, outcome) = repo.load();
    assert_eq!(outcome, LoadOutcome::Stored);
    assert_eq!(
        notes.iter().map(|note| note.id).collect::<Vec<_>>(),
        vec![2, created_id]
    );
    assert_eq!(notes[1].content.as_deref(), Some("milk, eggs"));
    assert!(repo.store().updated_at("notenest-notes").unwrap().is_some());
}

#[test]
fn raw_layout_matches_the_browser_storage_shape() {
    let mut store = SqliteBlobStore::open_in_memory().unwrap();
    store
        .set(
            "notenest-notes",
            r#"[{"id":1,"title":"Legacy"},{"id":5,"title":"New","content":"x","createdAt":5}]"#,
        )
        .unwrap();

    let repo = NotesRepository::new(store, "notenest-notes");
    let (notes, outcome) = repo.load();
    assert_eq!(outcome, LoadOutcome::Stored);
    assert_eq!(notes[0].content, None);
    assert_eq!(notes[0].created_at, None);
    assert_eq!(notes[1].created_at, Some(5));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
