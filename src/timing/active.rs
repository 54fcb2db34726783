use chrono::NaiveTime;

use crate::models::{PrayerRecord, PrayerTime};

/// The currently relevant prayer and the one that follows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivePrayer {
    pub current: PrayerTime,
    pub next: PrayerTime,
    /// True when no prayer time has passed yet today; `current` is then the
    /// first prayer of the day, still ahead.
    pub upcoming: bool,
    /// Completion flag for `current` from today's record.
    pub completed: bool,
}

impl ActivePrayer {
    /// Display range for the active slot: "HH:MM–HH:MM", or "Menuju HH:MM"
    /// while the first prayer of the day is still ahead.
    pub fn display_range(&self) -> String {
        if self.upcoming {
            format!("Menuju {}", self.current.time.format("%H:%M"))
        } else {
            format!(
                "{}–{}",
                self.current.time.format("%H:%M"),
                self.next.time.format("%H:%M")
            )
        }
    }
}

/// Select the most recent prayer whose time is ≤ now, plus its successor
/// (wrapping from the last prayer to the first of the next cycle). Returns
/// None only for an empty schedule.
pub fn select_active(
    schedule: &[PrayerTime],
    now: NaiveTime,
    record: &PrayerRecord,
) -> Option<ActivePrayer> {
    let first = *schedule.first()?;

    let current_idx = schedule
        .iter()
        .rposition(|p| p.time <= now);

    match current_idx {
        Some(idx) => {
            let current = schedule[idx];
            // Wrap to the first prayer of the next cycle after the last one.
            let next = schedule.get(idx + 1).copied().unwrap_or(first);
            Some(ActivePrayer {
                current,
                next,
                upcoming: false,
                completed: record.is_done(current.key),
            })
        }
        None => {
            let next = schedule.get(1).copied().unwrap_or(first);
            Some(ActivePrayer {
                current: first,
                next,
                upcoming: true,
                completed: record.is_done(first.key),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrayerKey;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn schedule() -> Vec<PrayerTime> {
        vec![
            PrayerTime::new(PrayerKey::Fajr, t(4, 35)),
            PrayerTime::new(PrayerKey::Dhuhr, t(12, 5)),
            PrayerTime::new(PrayerKey::Asr, t(15, 15)),
            PrayerTime::new(PrayerKey::Maghrib, t(18, 10)),
            PrayerTime::new(PrayerKey::Isha, t(19, 25)),
        ]
    }

    #[test]
    fn midday_selects_dhuhr_with_asr_next() {
        let active = select_active(&schedule(), t(13, 0), &PrayerRecord::default()).unwrap();
        assert_eq!(active.current.key, PrayerKey::Dhuhr);
        assert_eq!(active.next.key, PrayerKey::Asr);
        assert!(!active.upcoming);
        assert_eq!(active.display_range(), "12:05–15:15");
    }

    #[test]
    fn before_fajr_is_upcoming() {
        let active = select_active(&schedule(), t(3, 0), &PrayerRecord::default()).unwrap();
        assert_eq!(active.current.key, PrayerKey::Fajr);
        assert!(active.upcoming);
        assert_eq!(active.display_range(), "Menuju 04:35");
    }

    #[test]
    fn after_isha_wraps_to_fajr() {
        let active = select_active(&schedule(), t(22, 0), &PrayerRecord::default()).unwrap();
        assert_eq!(active.current.key, PrayerKey::Isha);
        assert_eq!(active.next.key, PrayerKey::Fajr);
        assert_eq!(active.display_range(), "19:25–04:35");
    }

    #[test]
    fn exact_prayer_time_is_active() {
        let active = select_active(&schedule(), t(12, 5), &PrayerRecord::default()).unwrap();
        assert_eq!(active.current.key, PrayerKey::Dhuhr);
        assert!(!active.upcoming);
    }

    #[test]
    fn completion_flag_comes_from_record() {
        let mut record = PrayerRecord::default();
        record.set_done(PrayerKey::Dhuhr, true);
        let active = select_active(&schedule(), t(13, 0), &record).unwrap();
        assert!(active.completed);
    }

    #[test]
    fn empty_schedule_yields_none() {
        assert!(select_active(&[], t(13, 0), &PrayerRecord::default()).is_none());
    }
}
