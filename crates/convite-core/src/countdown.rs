use chrono::{DateTime, Utc};

pub const HEADING: &str = "Falta muy poco para el gran día";
pub const ARRIVED_MESSAGE: &str = "¡El gran día ha llegado! 🎉";

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Whole units remaining until the event. Each unit is truncated, never rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeLeft {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeLeft {
    pub const ZERO: TimeLeft = TimeLeft {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    fn from_millis(ms: i64) -> Self {
        let ms = ms.max(0);
        Self {
            days: (ms / MS_PER_DAY) as u64,
            hours: ((ms / MS_PER_HOUR) % 24) as u8,
            minutes: ((ms / MS_PER_MINUTE) % 60) as u8,
            seconds: ((ms / MS_PER_SECOND) % 60) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running(TimeLeft),
    /// Terminal: the event time has been reached.
    Passed,
}

impl CountdownState {
    /// Breakdown of `target - now`; `Passed` once `now >= target`.
    pub fn compute(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if now >= target {
            return CountdownState::Passed;
        }
        // Under a millisecond left still counts as running, at zero.
        let remaining = target.signed_duration_since(now).num_milliseconds();
        CountdownState::Running(TimeLeft::from_millis(remaining))
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, CountdownState::Passed)
    }

    /// The displayed values; all zero once passed.
    pub fn time_left(&self) -> TimeLeft {
        match self {
            CountdownState::Running(left) => *left,
            CountdownState::Passed => TimeLeft::ZERO,
        }
    }

    /// `(label, value)` pairs in display order.
    pub fn units(&self) -> [(&'static str, u64); 4] {
        let left = self.time_left();
        [
            ("Días", left.days),
            ("Horas", u64::from(left.hours)),
            ("Minutos", u64::from(left.minutes)),
            ("Segundos", u64::from(left.seconds)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 1, 9, 30, 0)
            .single()
            .expect("valid now")
    }

    #[test]
    fn one_of_each_unit() {
        let target = now() + Duration::milliseconds(90_061_000);
        assert_eq!(
            CountdownState::compute(target, now()),
            CountdownState::Running(TimeLeft {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1,
            })
        );
    }

    #[test]
    fn truncates_partial_seconds() {
        let target = now() + Duration::milliseconds(59_999);
        let state = CountdownState::compute(target, now());
        assert_eq!(state.time_left().seconds, 59);
        assert_eq!(state.time_left().minutes, 0);

        let target = now() + Duration::milliseconds(999);
        assert_eq!(CountdownState::compute(target, now()).time_left(), TimeLeft::ZERO);
        assert!(!CountdownState::compute(target, now()).is_passed());
    }

    #[test]
    fn reached_or_past_target_is_terminal() {
        assert!(CountdownState::compute(now(), now()).is_passed());
        let long_ago = now() - Duration::days(3_650);
        let state = CountdownState::compute(long_ago, now());
        assert_eq!(state, CountdownState::Passed);
        assert_eq!(state.time_left(), TimeLeft::ZERO);
    }

    #[test]
    fn sub_millisecond_before_target_is_still_running() {
        let target = Utc
            .with_ymd_and_hms(2025, 12, 20, 23, 0, 0)
            .single()
            .expect("valid target");
        let state = CountdownState::compute(target, target - Duration::microseconds(1));
        assert_eq!(state, CountdownState::Running(TimeLeft::ZERO));

        let state = CountdownState::compute(target, target - Duration::microseconds(500));
        assert!(!state.is_passed());
        assert!(CountdownState::compute(target, target + Duration::microseconds(1)).is_passed());
    }

    #[test]
    fn many_days_do_not_wrap() {
        let target = now() + Duration::days(400) + Duration::hours(23);
        let left = CountdownState::compute(target, now()).time_left();
        assert_eq!(left.days, 400);
        assert_eq!(left.hours, 23);
    }
}
