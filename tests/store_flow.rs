//! End-to-end flow over the sqlite-backed document store: sign in, subscribe
//! to today's record, mark prayers, and read Moon Mode settings back.

use chrono::NaiveDate;
use tempfile::TempDir;

use mihrab::models::{HaidPeriod, PrayerKey};
use mihrab::records::{HaidSettings, PrayerRecords, WriteOutcome};
use mihrab::session;
use mihrab::store::{DocumentStore, SqliteStore};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
}

#[test]
fn identity_survives_reopening_the_store() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("mihrab.db");

    let first = {
        let store = SqliteStore::open(&db).unwrap();
        session::sign_in(&store, None).unwrap()
    };
    let second = {
        let store = SqliteStore::open(&db).unwrap();
        session::sign_in(&store, None).unwrap()
    };
    assert_eq!(first, second);
}

#[test]
fn mark_flow_pushes_snapshots_to_the_subscriber() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open(&dir.path().join("mihrab.db")).unwrap();
    let identity = session::sign_in(&store, Some("it-user")).unwrap();

    let doc = PrayerRecords::for_day("mihrab", &identity, day());
    let sub = doc.subscribe(&store).unwrap();

    // Initial snapshot: document does not exist yet.
    let initial = sub.recv().unwrap();
    assert!(!initial.exists);

    assert_eq!(doc.mark_done(&store, PrayerKey::Fajr), WriteOutcome::Accepted);
    assert_eq!(doc.mark_done(&store, PrayerKey::Dhuhr), WriteOutcome::Accepted);

    // The subscriber sees the merged state, replacing the old copy wholesale.
    let latest = sub.try_latest().unwrap();
    let record = PrayerRecords::from_snapshot(&latest);
    assert!(record.is_done(PrayerKey::Fajr));
    assert!(record.is_done(PrayerKey::Dhuhr));
    assert!(!record.is_done(PrayerKey::Isha));
}

#[test]
fn record_persists_across_store_reopen() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("mihrab.db");

    {
        let store = SqliteStore::open(&db).unwrap();
        let identity = session::sign_in(&store, Some("it-user")).unwrap();
        let doc = PrayerRecords::for_day("mihrab", &identity, day());
        doc.mark_done(&store, PrayerKey::Asr);
    }

    let store = SqliteStore::open(&db).unwrap();
    let identity = session::sign_in(&store, Some("it-user")).unwrap();
    let doc = PrayerRecords::for_day("mihrab", &identity, day());
    let record = PrayerRecords::from_snapshot(&store.read(doc.path()).unwrap());
    assert!(record.is_done(PrayerKey::Asr));
    assert_eq!(record.completed_count(), 1);
}

#[test]
fn haid_settings_drive_suspension_status() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open(&dir.path().join("mihrab.db")).unwrap();
    let identity = session::sign_in(&store, Some("it-user")).unwrap();

    let settings = HaidSettings::new("mihrab", &identity);
    let sub = settings.subscribe(&store).unwrap();
    assert!(!sub.recv().unwrap().exists);

    settings.save(&store, &HaidPeriod::new("2025-01-01", "2025-01-05"));
    let period = HaidSettings::from_snapshot(&sub.try_latest().unwrap());

    let status = period.evaluate(day());
    assert!(status.active);
    assert_eq!(status.day, 3);
    assert_eq!(status.total, 5);
    assert!(!period.evaluate(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()).active);
}

#[test]
fn users_do_not_see_each_others_documents() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open(&dir.path().join("mihrab.db")).unwrap();

    let alice = session::sign_in(&store, Some("alice")).unwrap();
    let bob = session::sign_in(&store, Some("bob")).unwrap();

    PrayerRecords::for_day("mihrab", &alice, day()).mark_done(&store, PrayerKey::Maghrib);

    let bob_doc = PrayerRecords::for_day("mihrab", &bob, day());
    let snap = store.read(bob_doc.path()).unwrap();
    assert!(!snap.exists);
}
