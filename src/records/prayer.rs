use std::cell::Cell;
use std::str::FromStr;

use chrono::NaiveDate;

use super::WriteOutcome;
use crate::models::{PrayerKey, PrayerRecord};
use crate::session::UserIdentity;
use crate::store::{DocPath, DocumentStore, Fields, Snapshot, StoreError, Subscription};

pub const COLLECTION: &str = "prayer_records";

/// One day's prayer-record document, id `YYYY-MM-DD`.
pub struct PrayerRecords {
    path: DocPath,
    in_flight: Cell<bool>,
}

impl PrayerRecords {
    pub fn for_day(app_id: &str, identity: &UserIdentity, date: NaiveDate) -> Self {
        let doc_id = date.format("%Y-%m-%d").to_string();
        Self {
            path: DocPath::new(app_id, &identity.uid, COLLECTION, &doc_id),
            in_flight: Cell::new(false),
        }
    }

    pub fn path(&self) -> &DocPath {
        &self.path
    }

    pub fn subscribe(&self, store: &dyn DocumentStore) -> Result<Subscription, StoreError> {
        store.subscribe(&self.path)
    }

    /// Build the day's record from a snapshot. Fields that are not one of the
    /// five prayer keys, or not booleans, are ignored.
    pub fn from_snapshot(snapshot: &Snapshot) -> PrayerRecord {
        let mut record = PrayerRecord::default();
        for (name, value) in &snapshot.fields {
            let Ok(key) = PrayerKey::from_str(name) else {
                continue;
            };
            if let Some(done) = value.as_bool() {
                record.set_done(key, done);
            }
        }
        record
    }

    /// Merge a single completion flag. Refused while a write is outstanding;
    /// a failed merge is logged and dropped.
    pub fn mark_done(&self, store: &dyn DocumentStore, key: PrayerKey) -> WriteOutcome {
        if self.in_flight.replace(true) {
            log::warn!("prayer record write already in flight, dropping mark for {}", key);
            return WriteOutcome::Busy;
        }

        let mut fields = Fields::new();
        fields.insert(key.as_str().to_string(), true.into());
        if let Err(e) = store.merge(&self.path, fields) {
            log::warn!("failed to write prayer record {}: {}", self.path, e);
        }

        self.in_flight.set(false);
        WriteOutcome::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FieldValue, SqliteStore};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
    }

    #[test]
    fn doc_id_is_the_date() {
        let identity = UserIdentity::new("u1");
        let records = PrayerRecords::for_day("mihrab", &identity, day());
        assert_eq!(records.path().doc_id, "2025-01-03");
        assert_eq!(records.path().collection, COLLECTION);
        assert_eq!(records.path().user_id, "u1");
    }

    #[test]
    fn mark_done_merges_only_that_key() {
        let store = SqliteStore::open_in_memory().unwrap();
        let identity = UserIdentity::new("u1");
        let records = PrayerRecords::for_day("mihrab", &identity, day());

        assert_eq!(
            records.mark_done(&store, PrayerKey::Fajr),
            WriteOutcome::Accepted
        );
        assert_eq!(
            records.mark_done(&store, PrayerKey::Dhuhr),
            WriteOutcome::Accepted
        );

        let snap = store.read(records.path()).unwrap();
        let record = PrayerRecords::from_snapshot(&snap);
        assert!(record.is_done(PrayerKey::Fajr));
        assert!(record.is_done(PrayerKey::Dhuhr));
        assert!(!record.is_done(PrayerKey::Asr));
        assert_eq!(record.completed_count(), 2);
    }

    #[test]
    fn snapshot_parsing_ignores_foreign_fields() {
        let mut snapshot = Snapshot::default();
        snapshot.exists = true;
        snapshot
            .fields
            .insert("fajr".into(), FieldValue::Bool(true));
        snapshot
            .fields
            .insert("note".into(), FieldValue::Str("hello".into()));
        snapshot
            .fields
            .insert("sunrise".into(), FieldValue::Bool(true));

        let record = PrayerRecords::from_snapshot(&snapshot);
        assert!(record.is_done(PrayerKey::Fajr));
        assert_eq!(record.completed_count(), 1);
    }
}
