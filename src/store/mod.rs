//! Document-store boundary.
//!
//! Per-user documents hold flat string/boolean field maps, addressed by
//! app id, user id, collection, and document id. Consumers subscribe to a
//! document and receive full snapshots pushed after every merge; each
//! snapshot replaces local state wholesale.

pub mod sqlite;

pub use sqlite::SqliteStore;

use std::collections::BTreeMap;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single flat field. No nesting beyond string/boolean values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Str(String),
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            FieldValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            FieldValue::Bool(_) => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

pub type Fields = BTreeMap<String, FieldValue>;

/// Full state of one document at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub exists: bool,
    pub fields: Fields,
}

impl Snapshot {
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.fields.get(key)?.as_bool()
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key)?.as_str()
    }
}

/// Address of one per-user document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    pub app_id: String,
    pub user_id: String,
    pub collection: String,
    pub doc_id: String,
}

impl DocPath {
    pub fn new(app_id: &str, user_id: &str, collection: &str, doc_id: &str) -> Self {
        Self {
            app_id: app_id.to_string(),
            user_id: user_id.to_string(),
            collection: collection.to_string(),
            doc_id: doc_id.to_string(),
        }
    }

    /// Flattened storage key.
    pub fn key(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.app_id, self.user_id, self.collection, self.doc_id
        )
    }
}

impl std::fmt::Display for DocPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("malformed document payload at {path}: {detail}")]
    Corrupt { path: String, detail: String },
}

/// Push-style subscription to one document. Drained on each UI tick.
pub struct Subscription {
    rx: mpsc::Receiver<Snapshot>,
}

impl Subscription {
    pub fn new(rx: mpsc::Receiver<Snapshot>) -> Self {
        Self { rx }
    }

    /// The most recent pending snapshot, if any arrived since the last call.
    /// Intermediate snapshots are discarded; only the latest state matters.
    pub fn try_latest(&self) -> Option<Snapshot> {
        let mut latest = None;
        while let Ok(snapshot) = self.rx.try_recv() {
            latest = Some(snapshot);
        }
        latest
    }

    /// Block for the next snapshot. Test helper; the app itself only drains.
    pub fn recv(&self) -> Option<Snapshot> {
        self.rx.recv().ok()
    }
}

pub trait DocumentStore {
    /// Register for push updates on a document. Delivers the current state
    /// immediately, then a fresh snapshot after every merge to that path.
    fn subscribe(&self, path: &DocPath) -> Result<Subscription, StoreError>;

    /// Partial update: listed fields are written, unspecified fields are
    /// preserved. Creates the document when absent.
    fn merge(&self, path: &DocPath, fields: Fields) -> Result<(), StoreError>;

    /// One-shot read of the current state.
    fn read(&self, path: &DocPath) -> Result<Snapshot, StoreError>;
}
