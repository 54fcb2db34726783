use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerKey {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerKey {
    /// The five daily prayers in schedule order.
    pub fn all() -> [PrayerKey; 5] {
        [
            PrayerKey::Fajr,
            PrayerKey::Dhuhr,
            PrayerKey::Asr,
            PrayerKey::Maghrib,
            PrayerKey::Isha,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerKey::Fajr => "fajr",
            PrayerKey::Dhuhr => "dhuhr",
            PrayerKey::Asr => "asr",
            PrayerKey::Maghrib => "maghrib",
            PrayerKey::Isha => "isha",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerKey::Fajr => "Fajr",
            PrayerKey::Dhuhr => "Dhuhr",
            PrayerKey::Asr => "Asr",
            PrayerKey::Maghrib => "Maghrib",
            PrayerKey::Isha => "Isha",
        }
    }

    /// The prayer after this one, wrapping from Isha to the next day's Fajr.
    pub fn next(&self) -> PrayerKey {
        match self {
            PrayerKey::Fajr => PrayerKey::Dhuhr,
            PrayerKey::Dhuhr => PrayerKey::Asr,
            PrayerKey::Asr => PrayerKey::Maghrib,
            PrayerKey::Maghrib => PrayerKey::Isha,
            PrayerKey::Isha => PrayerKey::Fajr,
        }
    }
}

impl std::fmt::Display for PrayerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fajr" => Ok(PrayerKey::Fajr),
            "dhuhr" | "zuhr" | "dhuhur" => Ok(PrayerKey::Dhuhr),
            "asr" => Ok(PrayerKey::Asr),
            "maghrib" => Ok(PrayerKey::Maghrib),
            "isha" => Ok(PrayerKey::Isha),
            _ => Err(anyhow::anyhow!("Unknown prayer: {}", s)),
        }
    }
}

/// One scheduled prayer for the day. Immutable once the schedule is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrayerTime {
    pub key: PrayerKey,
    pub time: NaiveTime,
}

impl PrayerTime {
    pub fn new(key: PrayerKey, time: NaiveTime) -> Self {
        Self { key, time }
    }
}

/// Completion flags for one calendar day, keyed by prayer.
/// Replaced wholesale by each store snapshot; never partially merged locally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrayerRecord {
    done: HashMap<PrayerKey, bool>,
}

impl PrayerRecord {
    pub fn is_done(&self, key: PrayerKey) -> bool {
        self.done.get(&key).copied().unwrap_or(false)
    }

    pub fn set_done(&mut self, key: PrayerKey, done: bool) {
        self.done.insert(key, done);
    }

    pub fn completed_count(&self) -> usize {
        PrayerKey::all().iter().filter(|k| self.is_done(**k)).count()
    }
}
