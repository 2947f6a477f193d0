//! Recurrence expansion for feeding schedules.
//!
//! Expands a schedule's recurrence rule into concrete feeding dates and
//! answers "is this date a feeding day?". Two feeding-day checks exist on
//! purpose: the strict check backs bulk and today-only materialization,
//! while the lenient check backs the location-change path, which treats
//! every day of a weekly schedule as eligible so a newly housed reptile is
//! picked up immediately rather than waiting for the next matching weekday.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::feeding::{Recurrence, RecurrenceRule};

/// Horizon substituted when a schedule has no end date.
pub const DEFAULT_HORIZON_DAYS: i64 = 30;

/// The end of the expansion range: the schedule's end date, or 30 days
/// past the start when the schedule is open-ended.
pub fn effective_end(start: NaiveDate, end: Option<NaiveDate>) -> NaiveDate {
    end.unwrap_or(start + Duration::days(DEFAULT_HORIZON_DAYS))
}

/// Day-of-week number with Sunday = 0, matching the stored day sets.
fn weekday_num(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// Expands a recurrence rule into the ordered ascending list of feeding
/// dates in `[from, to]`, both boundaries inclusive.
///
/// Stepping is anchored at `from`. An inverted range produces an empty
/// list; so does an `interval` rule whose length is absent or not
/// positive. Neither case is an error.
pub fn expand_dates(rule: &RecurrenceRule, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    if from > to {
        return Vec::new();
    }

    match rule.recurrence {
        Recurrence::Daily => step_dates(from, to, 1),
        Recurrence::Weekly => step_dates(from, to, 7),
        Recurrence::Interval => match rule.interval_days {
            Some(n) if n > 0 => step_dates(from, to, i64::from(n)),
            _ => Vec::new(),
        },
        Recurrence::Custom => {
            let mut dates = Vec::new();
            let mut current = from;
            while current <= to {
                if rule.days_of_week.contains(&weekday_num(current)) {
                    dates.push(current);
                }
                current = current + Duration::days(1);
            }
            dates
        }
    }
}

/// Steps from `from` to `to` inclusive by `step` days.
fn step_dates(from: NaiveDate, to: NaiveDate, step: i64) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = from;
    while current <= to {
        dates.push(current);
        current = current + Duration::days(step);
    }
    dates
}

/// Strict feeding-day check used by bulk and today-only materialization.
///
/// `daily`: every day from the start date on. `weekly`: only the start's
/// own weekday. `interval`: only exact multiples of the interval since
/// the start. `custom`: only weekdays in the configured set. Dates before
/// the start are never feeding days; end dates are the caller's concern.
pub fn is_feeding_day(rule: &RecurrenceRule, date: NaiveDate) -> bool {
    if date < rule.start_date {
        return false;
    }
    match rule.recurrence {
        Recurrence::Daily => true,
        Recurrence::Weekly => weekday_num(date) == weekday_num(rule.start_date),
        Recurrence::Interval => match rule.interval_days {
            Some(n) if n > 0 => (date - rule.start_date).num_days() % i64::from(n) == 0,
            _ => false,
        },
        Recurrence::Custom => rule.days_of_week.contains(&weekday_num(date)),
    }
}

/// Lenient feeding-day check used only by the location-change path.
///
/// Identical to [`is_feeding_day`] except that `weekly` accepts every day
/// from the start date on.
pub fn is_feeding_day_lenient(rule: &RecurrenceRule, date: NaiveDate) -> bool {
    if date < rule.start_date {
        return false;
    }
    match rule.recurrence {
        Recurrence::Weekly => true,
        _ => is_feeding_day(rule, date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(recurrence: Recurrence, start: NaiveDate) -> RecurrenceRule {
        RecurrenceRule {
            recurrence,
            interval_days: None,
            days_of_week: vec![],
            start_date: start,
            end_date: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_counts_inclusive() {
        let start = date(2024, 1, 1);
        let end = date(2024, 1, 15);
        let dates = expand_dates(&rule(Recurrence::Daily, start), start, end);
        // end - start + 1 dates, boundaries included
        assert_eq!(dates.len(), 15);
        assert_eq!(dates[0], start);
        assert_eq!(*dates.last().unwrap(), end);
    }

    #[test]
    fn test_weekly_counts() {
        let start = date(2024, 1, 1);
        let end = date(2024, 1, 31);
        let dates = expand_dates(&rule(Recurrence::Weekly, start), start, end);
        // floor(30 / 7) + 1 = 5
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[1], date(2024, 1, 8));
        // every date shares the start's weekday
        assert!(dates.iter().all(|d| d.weekday() == start.weekday()));
    }

    #[test]
    fn test_interval_scenario() {
        let mut r = rule(Recurrence::Interval, date(2024, 1, 1));
        r.interval_days = Some(3);
        let dates = expand_dates(&r, date(2024, 1, 1), date(2024, 1, 10));
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 1),
                date(2024, 1, 4),
                date(2024, 1, 7),
                date(2024, 1, 10),
            ]
        );
    }

    #[test]
    fn test_interval_without_length_is_empty() {
        let start = date(2024, 1, 1);
        let end = date(2024, 2, 1);

        for interval in [None, Some(0), Some(-4)] {
            let mut r = rule(Recurrence::Interval, start);
            r.interval_days = interval;
            assert!(expand_dates(&r, start, end).is_empty());
        }
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let start = date(2024, 6, 10);
        let end = date(2024, 6, 1);
        for recurrence in [Recurrence::Daily, Recurrence::Weekly, Recurrence::Interval] {
            let mut r = rule(recurrence, start);
            r.interval_days = Some(2);
            assert!(expand_dates(&r, start, end).is_empty());
        }
    }

    #[test]
    fn test_single_day_range() {
        let day = date(2024, 4, 4);
        let dates = expand_dates(&rule(Recurrence::Weekly, day), day, day);
        assert_eq!(dates, vec![day]);
    }

    #[test]
    fn test_custom_filters_weekdays() {
        // 2024-01-01 is a Monday; set = Monday (1) and Thursday (4)
        let mut r = rule(Recurrence::Custom, date(2024, 1, 1));
        r.days_of_week = vec![1, 4];
        let dates = expand_dates(&r, date(2024, 1, 1), date(2024, 1, 14));
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 1),
                date(2024, 1, 4),
                date(2024, 1, 8),
                date(2024, 1, 11),
            ]
        );
    }

    #[test]
    fn test_custom_empty_set_is_empty() {
        let r = rule(Recurrence::Custom, date(2024, 1, 1));
        assert!(expand_dates(&r, date(2024, 1, 1), date(2024, 1, 31)).is_empty());
    }

    #[test]
    fn test_effective_end_defaults_to_horizon() {
        let start = date(2024, 3, 1);
        assert_eq!(effective_end(start, None), date(2024, 3, 31));
        assert_eq!(
            effective_end(start, Some(date(2024, 3, 10))),
            date(2024, 3, 10)
        );
    }

    #[test]
    fn test_strict_weekly_requires_matching_weekday() {
        // Start Monday 2024-01-01
        let r = rule(Recurrence::Weekly, date(2024, 1, 1));
        assert!(is_feeding_day(&r, date(2024, 1, 1)));
        assert!(is_feeding_day(&r, date(2024, 1, 8)));
        // Wednesday two days later is not a feeding day
        assert!(!is_feeding_day(&r, date(2024, 1, 3)));
    }

    #[test]
    fn test_lenient_weekly_accepts_any_day_after_start() {
        let r = rule(Recurrence::Weekly, date(2024, 1, 1));
        assert!(is_feeding_day_lenient(&r, date(2024, 1, 1)));
        assert!(is_feeding_day_lenient(&r, date(2024, 1, 3)));
        assert!(is_feeding_day_lenient(&r, date(2024, 1, 6)));
        assert!(!is_feeding_day_lenient(&r, date(2023, 12, 31)));
    }

    #[test]
    fn test_strict_daily_from_start() {
        let r = rule(Recurrence::Daily, date(2024, 5, 10));
        assert!(!is_feeding_day(&r, date(2024, 5, 9)));
        assert!(is_feeding_day(&r, date(2024, 5, 10)));
        assert!(is_feeding_day(&r, date(2024, 8, 1)));
    }

    #[test]
    fn test_strict_interval_exact_multiples() {
        let mut r = rule(Recurrence::Interval, date(2024, 1, 1));
        r.interval_days = Some(5);
        assert!(is_feeding_day(&r, date(2024, 1, 1)));
        assert!(is_feeding_day(&r, date(2024, 1, 6)));
        assert!(is_feeding_day(&r, date(2024, 1, 11)));
        assert!(!is_feeding_day(&r, date(2024, 1, 5)));
        assert!(!is_feeding_day(&r, date(2024, 1, 7)));
    }

    #[test]
    fn test_strict_custom_checks_day_set() {
        // Saturday = 6
        let mut r = rule(Recurrence::Custom, date(2024, 1, 1));
        r.days_of_week = vec![6];
        assert!(is_feeding_day(&r, date(2024, 1, 6)));
        assert!(!is_feeding_day(&r, date(2024, 1, 5)));
    }

    #[test]
    fn test_lenient_matches_strict_for_non_weekly() {
        let mut r = rule(Recurrence::Interval, date(2024, 1, 1));
        r.interval_days = Some(3);
        for offset in 0..10 {
            let d = date(2024, 1, 1) + Duration::days(offset);
            assert_eq!(is_feeding_day(&r, d), is_feeding_day_lenient(&r, d));
        }
    }
}
