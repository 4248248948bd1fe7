//! Which itinerary entries have already happened, by wall-clock time.

use chrono::{DateTime, TimeZone};

use crate::record::TimelineEntry;

/// One flag per timeline entry, `true` once that entry's time of day has
/// been reached today.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineStatus {
    passed: Vec<bool>,
}

impl TimelineStatus {
    /// Entries are evaluated independently against today's date in `now`'s
    /// timezone, not against the event date. Unparseable times never pass.
    pub fn evaluate<Tz: TimeZone>(entries: &[TimelineEntry], now: &DateTime<Tz>) -> Self {
        let clock = now.naive_local().time();
        let passed = entries
            .iter()
            .map(|entry| match entry.time_of_day() {
                Some(at) => at <= clock,
                None => {
                    tracing::warn!(time = %entry.time, label = %entry.label, "unparseable timeline time");
                    false
                }
            })
            .collect();
        Self { passed }
    }

    pub fn from_flags(passed: Vec<bool>) -> Self {
        Self { passed }
    }

    pub fn flags(&self) -> &[bool] {
        &self.passed
    }

    pub fn is_passed(&self, index: usize) -> bool {
        self.passed.get(index).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.passed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passed.is_empty()
    }

    /// The entry in progress: the one just before the first entry that
    /// has not passed, or the last entry once all have passed.
    pub fn current_index(&self) -> Option<usize> {
        match self.passed.iter().position(|passed| !passed) {
            Some(first_pending) => first_pending.checked_sub(1),
            None => self.passed.len().checked_sub(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Ceremony,
    Party,
    Clock,
}

impl EntryKind {
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("ceremonia") {
            EntryKind::Ceremony
        } else if label.contains("fiesta") || label.contains("recepción") {
            EntryKind::Party
        } else {
            EntryKind::Clock
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            EntryKind::Ceremony => "⛪",
            EntryKind::Party => "🎉",
            EntryKind::Clock => "🕒",
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Utc};

    use super::*;

    fn entries(times: &[&str]) -> Vec<TimelineEntry> {
        times
            .iter()
            .enumerate()
            .map(|(i, time)| TimelineEntry::new(*time, format!("e{i}")))
            .collect()
    }

    #[test]
    fn morning_passed_night_pending_at_noon() {
        let now = Utc.with_ymd_and_hms(2025, 6, 3, 12, 0, 0).single().expect("now");
        let status = TimelineStatus::evaluate(
            &[TimelineEntry::new("08:00", "A"), TimelineEntry::new("23:59", "B")],
            &now,
        );
        assert_eq!(status.flags(), &[true, false]);
    }

    #[test]
    fn exact_minute_counts_as_passed() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 17, 0, 0).single().expect("now");
        let status = TimelineStatus::evaluate(&entries(&["17:00", "17:01"]), &now);
        assert_eq!(status.flags(), &[true, false]);
    }

    #[test]
    fn uses_the_local_clock_of_now() {
        let offset = FixedOffset::west_opt(6 * 3600).expect("offset");
        // 02:00 UTC is 20:00 of the previous day at UTC-6.
        let now = Utc
            .with_ymd_and_hms(2025, 12, 21, 2, 0, 0)
            .single()
            .expect("now")
            .with_timezone(&offset);
        let status = TimelineStatus::evaluate(&entries(&["19:00", "20:30"]), &now);
        assert_eq!(status.flags(), &[true, false]);
    }

    #[test]
    fn order_is_not_assumed() {
        let now = Utc.with_ymd_and_hms(2025, 6, 3, 12, 0, 0).single().expect("now");
        let status = TimelineStatus::evaluate(&entries(&["23:00", "09:00", "bad"]), &now);
        assert_eq!(status.flags(), &[false, true, false]);
    }

    #[test]
    fn current_index_rules() {
        assert_eq!(TimelineStatus::from_flags(vec![]).current_index(), None);
        assert_eq!(TimelineStatus::from_flags(vec![false, false]).current_index(), None);
        assert_eq!(TimelineStatus::from_flags(vec![true, true, false]).current_index(), Some(1));
        assert_eq!(TimelineStatus::from_flags(vec![true, true, true]).current_index(), Some(2));
    }

    #[test]
    fn classifies_labels() {
        assert_eq!(EntryKind::classify("Ceremonia religiosa"), EntryKind::Ceremony);
        assert_eq!(EntryKind::classify("RECEPCIÓN"), EntryKind::Party);
        assert_eq!(EntryKind::classify("Fiesta"), EntryKind::Party);
        assert_eq!(EntryKind::classify("Vals"), EntryKind::Clock);
    }
}
