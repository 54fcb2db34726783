pub mod dhikr;
pub mod haid;
pub mod prayer;
pub mod surah;

pub use haid::{HaidPeriod, HaidStatus};
pub use prayer::{PrayerKey, PrayerRecord, PrayerTime};
pub use surah::Surah;
