use chrono::{Duration, NaiveTime};

/// Seconds after the scheduled time before a prayer counts as passed.
pub const PASSED_GRACE_SECS: i64 = 60;

/// Minutes before the scheduled time at which early completion opens.
pub const EARLY_WINDOW_MINS: i64 = 10;

/// True once `now` is strictly past scheduled time + grace buffer.
pub fn has_passed(scheduled: NaiveTime, now: NaiveTime) -> bool {
    now.signed_duration_since(scheduled) > Duration::seconds(PASSED_GRACE_SECS)
}

/// True while `now` lies in [scheduled − EARLY_WINDOW, scheduled).
/// Inclusive at the window start, exclusive at the scheduled time itself.
pub fn in_early_window(scheduled: NaiveTime, now: NaiveTime) -> bool {
    let until = scheduled.signed_duration_since(now);
    until > Duration::zero() && until <= Duration::minutes(EARLY_WINDOW_MINS)
}

/// Whether the mark-complete action is permitted right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkGate {
    Allowed,
    /// The early-completion window has not opened yet.
    TooEarly,
    /// Moon Mode is active; marking is suppressed for every prayer.
    Suspended,
}

pub fn can_mark(scheduled: NaiveTime, now: NaiveTime, haid_active: bool) -> MarkGate {
    if haid_active {
        return MarkGate::Suspended;
    }
    if now >= scheduled || in_early_window(scheduled, now) {
        MarkGate::Allowed
    } else {
        MarkGate::TooEarly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn passed_only_beyond_grace_buffer() {
        let scheduled = t(12, 5, 0);
        // exactly at T + G is not passed
        assert!(!has_passed(scheduled, t(12, 6, 0)));
        // one second beyond is
        assert!(has_passed(scheduled, t(12, 6, 1)));
        assert!(!has_passed(scheduled, t(12, 5, 0)));
        assert!(!has_passed(scheduled, t(11, 0, 0)));
    }

    #[test]
    fn early_window_inclusive_start_exclusive_end() {
        let scheduled = t(12, 5, 0);
        // exactly T - W is inside
        assert!(in_early_window(scheduled, t(11, 55, 0)));
        // one second before the window is outside
        assert!(!in_early_window(scheduled, t(11, 54, 59)));
        // exactly T is outside
        assert!(!in_early_window(scheduled, t(12, 5, 0)));
        assert!(in_early_window(scheduled, t(12, 4, 59)));
    }

    #[test]
    fn marking_gated_by_window_and_moon_mode() {
        let scheduled = t(15, 15, 0);
        assert_eq!(can_mark(scheduled, t(15, 20, 0), false), MarkGate::Allowed);
        assert_eq!(can_mark(scheduled, t(15, 6, 0), false), MarkGate::Allowed);
        assert_eq!(can_mark(scheduled, t(15, 4, 0), false), MarkGate::TooEarly);
        assert_eq!(
            can_mark(scheduled, t(15, 20, 0), true),
            MarkGate::Suspended
        );
    }
}
