use std::cell::Cell;

use super::WriteOutcome;
use crate::models::HaidPeriod;
use crate::models::haid::{FIELD_END_DATE, FIELD_START_DATE};
use crate::session::UserIdentity;
use crate::store::{DocPath, DocumentStore, Fields, Snapshot, StoreError, Subscription};

pub const COLLECTION: &str = "settings";
pub const DOC_ID: &str = "haid";

/// The single haid settings document for a user.
pub struct HaidSettings {
    path: DocPath,
    in_flight: Cell<bool>,
}

impl HaidSettings {
    pub fn new(app_id: &str, identity: &UserIdentity) -> Self {
        Self {
            path: DocPath::new(app_id, &identity.uid, COLLECTION, DOC_ID),
            in_flight: Cell::new(false),
        }
    }

    pub fn path(&self) -> &DocPath {
        &self.path
    }

    pub fn subscribe(&self, store: &dyn DocumentStore) -> Result<Subscription, StoreError> {
        store.subscribe(&self.path)
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> HaidPeriod {
        HaidPeriod {
            start_date: snapshot.get_str(FIELD_START_DATE).map(str::to_string),
            end_date: snapshot.get_str(FIELD_END_DATE).map(str::to_string),
        }
    }

    /// Merge a new range. Same fire-and-forget contract as the prayer record.
    pub fn save(&self, store: &dyn DocumentStore, period: &HaidPeriod) -> WriteOutcome {
        let mut fields = Fields::new();
        fields.insert(
            FIELD_START_DATE.to_string(),
            period.start_date.clone().unwrap_or_default().into(),
        );
        fields.insert(
            FIELD_END_DATE.to_string(),
            period.end_date.clone().unwrap_or_default().into(),
        );
        self.write(store, fields)
    }

    /// Documents are only ever merged, so clearing writes empty strings,
    /// which the evaluator treats as an inactive range.
    pub fn clear(&self, store: &dyn DocumentStore) -> WriteOutcome {
        let mut fields = Fields::new();
        fields.insert(FIELD_START_DATE.to_string(), "".into());
        fields.insert(FIELD_END_DATE.to_string(), "".into());
        self.write(store, fields)
    }

    fn write(&self, store: &dyn DocumentStore, fields: Fields) -> WriteOutcome {
        if self.in_flight.replace(true) {
            log::warn!("haid settings write already in flight, dropping");
            return WriteOutcome::Busy;
        }
        if let Err(e) = store.merge(&self.path, fields) {
            log::warn!("failed to write haid settings {}: {}", self.path, e);
        }
        self.in_flight.set(false);
        WriteOutcome::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use chrono::NaiveDate;

    #[test]
    fn save_and_reload_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let identity = UserIdentity::new("u1");
        let settings = HaidSettings::new("mihrab", &identity);

        let period = HaidPeriod::new("2025-01-01", "2025-01-05");
        assert_eq!(settings.save(&store, &period), WriteOutcome::Accepted);

        let snap = store.read(settings.path()).unwrap();
        assert_eq!(HaidSettings::from_snapshot(&snap), period);
    }

    #[test]
    fn clear_deactivates_the_range() {
        let store = SqliteStore::open_in_memory().unwrap();
        let identity = UserIdentity::new("u1");
        let settings = HaidSettings::new("mihrab", &identity);
        let today = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();

        settings.save(&store, &HaidPeriod::new("2025-01-01", "2025-01-05"));
        let before = HaidSettings::from_snapshot(&store.read(settings.path()).unwrap());
        assert!(before.evaluate(today).active);

        settings.clear(&store);
        let after = HaidSettings::from_snapshot(&store.read(settings.path()).unwrap());
        assert!(!after.evaluate(today).active);
    }
}
