use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Field names in the haid settings document.
pub const FIELD_START_DATE: &str = "start_date";
pub const FIELD_END_DATE: &str = "end_date";

/// A menstrual-cycle suspension window, inclusive on both ends.
/// Dates are kept as the raw stored strings; parsing happens at evaluation
/// time so that malformed stored data degrades to "inactive" instead of
/// failing the load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HaidPeriod {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl HaidPeriod {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
        }
    }

    pub fn is_set(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Evaluate today's status. Absent dates, unparseable dates, or
    /// start > end all yield the inactive status.
    pub fn evaluate(&self, today: NaiveDate) -> HaidStatus {
        let (start, end) = match (self.parsed_start(), self.parsed_end()) {
            (Some(s), Some(e)) => (s, e),
            _ => return HaidStatus::inactive(),
        };
        if start > end {
            return HaidStatus::inactive();
        }
        if today < start || today > end {
            return HaidStatus::inactive();
        }
        let day = (today - start).num_days() as u32 + 1;
        let total = (end - start).num_days() as u32 + 1;
        HaidStatus {
            active: true,
            day,
            total,
        }
    }

    fn parsed_start(&self) -> Option<NaiveDate> {
        parse_date(self.start_date.as_deref()?)
    }

    fn parsed_end(&self) -> Option<NaiveDate> {
        parse_date(self.end_date.as_deref()?)
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Derived day-of-range status; never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HaidStatus {
    pub active: bool,
    /// 1-based day index within the range, 0 when inactive.
    pub day: u32,
    /// Inclusive span length in days, 0 when inactive.
    pub total: u32,
}

impl HaidStatus {
    pub fn inactive() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn inside_range_reports_day_and_total() {
        let period = HaidPeriod::new("2025-01-01", "2025-01-05");
        let status = period.evaluate(date("2025-01-03"));
        assert!(status.active);
        assert_eq!(status.day, 3);
        assert_eq!(status.total, 5);
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let period = HaidPeriod::new("2025-01-01", "2025-01-05");
        assert!(period.evaluate(date("2025-01-01")).active);
        assert_eq!(period.evaluate(date("2025-01-01")).day, 1);
        assert!(period.evaluate(date("2025-01-05")).active);
        assert_eq!(period.evaluate(date("2025-01-05")).day, 5);
    }

    #[test]
    fn outside_range_is_inactive() {
        let period = HaidPeriod::new("2025-01-01", "2025-01-05");
        assert!(!period.evaluate(date("2025-01-06")).active);
        assert!(!period.evaluate(date("2024-12-31")).active);
    }

    #[test]
    fn start_after_end_is_inactive_regardless_of_today() {
        let period = HaidPeriod::new("2025-01-05", "2025-01-01");
        assert!(!period.evaluate(date("2025-01-03")).active);
        assert!(!period.evaluate(date("2025-01-05")).active);
    }

    #[test]
    fn malformed_or_missing_dates_are_inactive() {
        let missing = HaidPeriod::default();
        assert!(!missing.evaluate(date("2025-01-03")).active);

        let garbled = HaidPeriod::new("not-a-date", "2025-01-05");
        assert!(!garbled.evaluate(date("2025-01-03")).active);

        let half = HaidPeriod {
            start_date: Some("2025-01-01".into()),
            end_date: None,
        };
        assert!(!half.evaluate(date("2025-01-03")).active);
    }

    #[test]
    fn single_day_range() {
        let period = HaidPeriod::new("2025-02-10", "2025-02-10");
        let status = period.evaluate(date("2025-02-10"));
        assert!(status.active);
        assert_eq!(status.day, 1);
        assert_eq!(status.total, 1);
    }
}
