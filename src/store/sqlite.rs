use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc;

use rusqlite::{Connection, OptionalExtension, params};

use super::{DocPath, DocumentStore, Fields, Snapshot, StoreError, Subscription};

/// Local document store backed by sqlite. Documents are rows keyed by the
/// flattened path, the field map serialized as JSON. Subscribers are plain
/// mpsc senders notified after every merge; everything runs on the UI thread.
pub struct SqliteStore {
    conn: Connection,
    subscribers: RefCell<HashMap<String, Vec<mpsc::Sender<Snapshot>>>>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(backend)?;
        // WAL so a stray second process cannot wedge the UI
        conn.execute_batch("PRAGMA journal_mode=WAL;").map_err(backend)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(backend)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        run_migrations(&conn)?;
        Ok(Self {
            conn,
            subscribers: RefCell::new(HashMap::new()),
        })
    }

    fn load(&self, path: &DocPath) -> Result<Snapshot, StoreError> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT fields FROM documents WHERE path = ?1",
                params![path.key()],
                |row| row.get(0),
            )
            .optional()
            .map_err(backend)?;

        match raw {
            None => Ok(Snapshot::default()),
            Some(json) => {
                let fields: Fields =
                    serde_json::from_str(&json).map_err(|e| StoreError::Corrupt {
                        path: path.key(),
                        detail: e.to_string(),
                    })?;
                Ok(Snapshot {
                    exists: true,
                    fields,
                })
            }
        }
    }

    fn notify(&self, path: &DocPath, snapshot: &Snapshot) {
        let mut subs = self.subscribers.borrow_mut();
        if let Some(senders) = subs.get_mut(&path.key()) {
            senders.retain(|tx| tx.send(snapshot.clone()).is_ok());
        }
    }

    /// App-local key/value metadata (anonymous uid and the like).
    pub fn meta_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.conn
            .query_row(
                "SELECT value FROM app_meta WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(backend)
    }

    pub fn meta_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = ?2",
                params![key, value],
            )
            .map_err(backend)?;
        Ok(())
    }
}

impl DocumentStore for SqliteStore {
    fn subscribe(&self, path: &DocPath) -> Result<Subscription, StoreError> {
        let (tx, rx) = mpsc::channel();
        let initial = self.load(path)?;
        // Initial snapshot cannot fail: the receiver is still in scope here.
        let _ = tx.send(initial);
        self.subscribers
            .borrow_mut()
            .entry(path.key())
            .or_default()
            .push(tx);
        Ok(Subscription::new(rx))
    }

    fn merge(&self, path: &DocPath, fields: Fields) -> Result<(), StoreError> {
        let mut merged = self.load(path)?.fields;
        for (k, v) in fields {
            merged.insert(k, v);
        }

        let json = serde_json::to_string(&merged).map_err(|e| StoreError::Corrupt {
            path: path.key(),
            detail: e.to_string(),
        })?;
        self.conn
            .execute(
                "INSERT INTO documents (path, fields) VALUES (?1, ?2)
                 ON CONFLICT(path) DO UPDATE SET fields = ?2, updated_at = datetime('now')",
                params![path.key(), json],
            )
            .map_err(backend)?;

        let snapshot = Snapshot {
            exists: true,
            fields: merged,
        };
        self.notify(path, &snapshot);
        Ok(())
    }

    fn read(&self, path: &DocPath) -> Result<Snapshot, StoreError> {
        self.load(path)
    }
}

fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            path       TEXT PRIMARY KEY,
            fields     TEXT NOT NULL,
            updated_at TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ",
    )
    .map_err(backend)
}

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FieldValue;

    fn path(doc: &str) -> DocPath {
        DocPath::new("mihrab", "user-1", "prayer_records", doc)
    }

    fn fields(entries: &[(&str, FieldValue)]) -> Fields {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn missing_document_reads_as_nonexistent() {
        let store = SqliteStore::open_in_memory().unwrap();
        let snap = store.read(&path("2025-01-03")).unwrap();
        assert!(!snap.exists);
        assert!(snap.fields.is_empty());
    }

    #[test]
    fn merge_preserves_unspecified_fields() {
        let store = SqliteStore::open_in_memory().unwrap();
        let p = path("2025-01-03");

        store
            .merge(&p, fields(&[("fajr", true.into()), ("dhuhr", false.into())]))
            .unwrap();
        store.merge(&p, fields(&[("dhuhr", true.into())])).unwrap();

        let snap = store.read(&p).unwrap();
        assert!(snap.exists);
        assert_eq!(snap.get_bool("fajr"), Some(true));
        assert_eq!(snap.get_bool("dhuhr"), Some(true));
    }

    #[test]
    fn subscribe_delivers_initial_then_pushes_on_merge() {
        let store = SqliteStore::open_in_memory().unwrap();
        let p = path("2025-01-03");

        let sub = store.subscribe(&p).unwrap();
        let initial = sub.recv().unwrap();
        assert!(!initial.exists);

        store.merge(&p, fields(&[("asr", true.into())])).unwrap();
        let pushed = sub.try_latest().unwrap();
        assert!(pushed.exists);
        assert_eq!(pushed.get_bool("asr"), Some(true));
    }

    #[test]
    fn try_latest_collapses_to_newest_snapshot() {
        let store = SqliteStore::open_in_memory().unwrap();
        let p = path("2025-01-03");
        let sub = store.subscribe(&p).unwrap();

        store.merge(&p, fields(&[("fajr", true.into())])).unwrap();
        store.merge(&p, fields(&[("fajr", false.into())])).unwrap();

        // initial + two pushes collapse to the final state
        let latest = sub.try_latest().unwrap();
        assert_eq!(latest.get_bool("fajr"), Some(false));
        assert!(sub.try_latest().is_none());
    }

    #[test]
    fn documents_are_isolated_by_path() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .merge(&path("2025-01-03"), fields(&[("fajr", true.into())]))
            .unwrap();

        let other = store.read(&path("2025-01-04")).unwrap();
        assert!(!other.exists);

        let other_user = DocPath::new("mihrab", "user-2", "prayer_records", "2025-01-03");
        assert!(!store.read(&other_user).unwrap().exists);
    }

    #[test]
    fn string_fields_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let p = DocPath::new("mihrab", "user-1", "settings", "haid");
        store
            .merge(&p, fields(&[("start_date", "2025-01-01".into())]))
            .unwrap();
        let snap = store.read(&p).unwrap();
        assert_eq!(snap.get_str("start_date"), Some("2025-01-01"));
        assert_eq!(snap.get_bool("start_date"), None);
    }

    #[test]
    fn meta_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.meta_get("anon_uid").unwrap(), None);
        store.meta_set("anon_uid", "abc").unwrap();
        store.meta_set("anon_uid", "def").unwrap();
        assert_eq!(store.meta_get("anon_uid").unwrap(), Some("def".into()));
    }
}
