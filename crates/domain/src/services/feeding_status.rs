//! Feeding completion aggregation.
//!
//! Determines the date a schedule is "about" right now and how much of
//! that day's feeding work is done.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::feeding::{Recurrence, RecurrenceRule};

/// The slice of a feeding event the aggregator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDay {
    pub scheduled_date: NaiveDate,
    pub fed: bool,
}

/// Completion state of a schedule on its relevant date.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedingStatus {
    pub relevant_date: NaiveDate,
    pub total_events: usize,
    pub completed_events: usize,
    pub percentage: f64,
    pub is_complete: bool,
}

/// How many days back `date`'s weekday last occurred relative to `anchor`'s
/// weekday (0 when they match).
fn days_since_weekday(date: NaiveDate, anchor: NaiveDate) -> i64 {
    let date_num = date.weekday().num_days_from_sunday() as i64;
    let anchor_num = anchor.weekday().num_days_from_sunday() as i64;
    (date_num - anchor_num).rem_euclid(7)
}

/// Resolves the date a schedule's completion should be reported for.
///
/// `daily` and `interval` schedules are always about today. `weekly`
/// schedules are about the most recent occurrence of the start date's
/// weekday; when no events exist on that date, the most recent event
/// within the last 7 days wins instead (latest scheduled date). `custom`
/// schedules are about today when its weekday is configured, otherwise
/// the nearest prior configured weekday within a week.
pub fn relevant_date(rule: &RecurrenceRule, events: &[EventDay], today: NaiveDate) -> NaiveDate {
    match rule.recurrence {
        Recurrence::Daily | Recurrence::Interval => today,
        Recurrence::Weekly => {
            let candidate = today - Duration::days(days_since_weekday(today, rule.start_date));
            if events.iter().any(|e| e.scheduled_date == candidate) {
                return candidate;
            }
            // No events on the computed weekday; fall back to the most
            // recent event within the last 7 days.
            events
                .iter()
                .filter(|e| e.scheduled_date <= today && e.scheduled_date > today - Duration::days(7))
                .map(|e| e.scheduled_date)
                .max()
                .unwrap_or(candidate)
        }
        Recurrence::Custom => {
            for back in 0..=7 {
                let candidate = today - Duration::days(back);
                if rule
                    .days_of_week
                    .contains(&(candidate.weekday().num_days_from_sunday() as i16))
                {
                    return candidate;
                }
            }
            today
        }
    }
}

/// Aggregates completion for a schedule's events as of `today`.
///
/// Zero events on the relevant date yields 0% and not-complete; the
/// division is explicitly guarded.
pub fn aggregate_status(rule: &RecurrenceRule, events: &[EventDay], today: NaiveDate) -> FeedingStatus {
    let date = relevant_date(rule, events, today);

    let total_events = events.iter().filter(|e| e.scheduled_date == date).count();
    let completed_events = events
        .iter()
        .filter(|e| e.scheduled_date == date && e.fed)
        .count();

    let percentage = if total_events == 0 {
        0.0
    } else {
        (completed_events as f64 / total_events as f64) * 100.0
    };

    FeedingStatus {
        relevant_date: date,
        total_events,
        completed_events,
        percentage,
        is_complete: total_events > 0 && completed_events == total_events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rule(recurrence: Recurrence, start: NaiveDate) -> RecurrenceRule {
        RecurrenceRule {
            recurrence,
            interval_days: None,
            days_of_week: vec![],
            start_date: start,
            end_date: None,
        }
    }

    fn event(d: NaiveDate, fed: bool) -> EventDay {
        EventDay {
            scheduled_date: d,
            fed,
        }
    }

    #[test]
    fn test_zero_events_never_divides() {
        let r = rule(Recurrence::Daily, date(2024, 1, 1));
        let status = aggregate_status(&r, &[], date(2024, 1, 15));
        assert_eq!(status.total_events, 0);
        assert_eq!(status.percentage, 0.0);
        assert!(!status.is_complete);
    }

    #[test]
    fn test_daily_counts_today_only() {
        let r = rule(Recurrence::Daily, date(2024, 1, 1));
        let today = date(2024, 1, 10);
        let events = [
            event(today, true),
            event(today, false),
            event(date(2024, 1, 9), true), // yesterday, ignored
        ];

        let status = aggregate_status(&r, &events, today);
        assert_eq!(status.relevant_date, today);
        assert_eq!(status.total_events, 2);
        assert_eq!(status.completed_events, 1);
        assert_eq!(status.percentage, 50.0);
        assert!(!status.is_complete);
    }

    #[test]
    fn test_full_completion() {
        let r = rule(Recurrence::Daily, date(2024, 1, 1));
        let today = date(2024, 1, 10);
        let events = [event(today, true), event(today, true)];

        let status = aggregate_status(&r, &events, today);
        assert_eq!(status.percentage, 100.0);
        assert!(status.is_complete);
    }

    #[test]
    fn test_weekly_on_matching_weekday_is_today() {
        // Start Monday; today also Monday
        let r = rule(Recurrence::Weekly, date(2024, 1, 1));
        let today = date(2024, 1, 15);
        let events = [event(today, false)];
        assert_eq!(relevant_date(&r, &events, today), today);
    }

    #[test]
    fn test_weekly_off_day_uses_most_recent_weekday() {
        // Start Monday 2024-01-01; today Thursday 2024-01-18
        let r = rule(Recurrence::Weekly, date(2024, 1, 1));
        let today = date(2024, 1, 18);
        let monday = date(2024, 1, 15);
        let events = [event(monday, true)];
        assert_eq!(relevant_date(&r, &events, today), monday);
    }

    #[test]
    fn test_weekly_falls_back_to_recent_event() {
        // Start Monday; today Thursday; no Monday events, but a Tuesday
        // event exists within the window (e.g. created by a mid-week
        // housing move).
        let r = rule(Recurrence::Weekly, date(2024, 1, 1));
        let today = date(2024, 1, 18);
        let tuesday = date(2024, 1, 16);
        let events = [event(tuesday, false)];
        assert_eq!(relevant_date(&r, &events, today), tuesday);
    }

    #[test]
    fn test_weekly_fallback_prefers_latest_date() {
        let r = rule(Recurrence::Weekly, date(2024, 1, 1));
        let today = date(2024, 1, 18);
        let events = [
            event(date(2024, 1, 16), false),
            event(date(2024, 1, 17), false),
            event(date(2024, 1, 12), true), // in the window but older
        ];
        assert_eq!(relevant_date(&r, &events, today), date(2024, 1, 17));
    }

    #[test]
    fn test_weekly_fallback_ignores_stale_events() {
        // Only event is 10 days old: outside the 7-day window, so the
        // computed weekday stands even with no events on it.
        let r = rule(Recurrence::Weekly, date(2024, 1, 1));
        let today = date(2024, 1, 18);
        let events = [event(date(2024, 1, 8), true)];
        assert_eq!(relevant_date(&r, &events, today), date(2024, 1, 15));
    }

    #[test]
    fn test_custom_today_when_weekday_configured() {
        // Thursday = 4
        let mut r = rule(Recurrence::Custom, date(2024, 1, 1));
        r.days_of_week = vec![4];
        let today = date(2024, 1, 18); // Thursday
        assert_eq!(relevant_date(&r, &[], today), today);
    }

    #[test]
    fn test_custom_scans_back_to_prior_day() {
        // Set = Monday (1); today Thursday 2024-01-18 → Monday 2024-01-15
        let mut r = rule(Recurrence::Custom, date(2024, 1, 1));
        r.days_of_week = vec![1];
        let today = date(2024, 1, 18);
        assert_eq!(relevant_date(&r, &[], today), date(2024, 1, 15));
    }

    #[test]
    fn test_custom_empty_set_defaults_to_today() {
        let r = rule(Recurrence::Custom, date(2024, 1, 1));
        let today = date(2024, 1, 18);
        assert_eq!(relevant_date(&r, &[], today), today);
    }

    #[test]
    fn test_interval_relevant_date_is_today() {
        let mut r = rule(Recurrence::Interval, date(2024, 1, 1));
        r.interval_days = Some(3);
        let today = date(2024, 1, 9);
        assert_eq!(relevant_date(&r, &[], today), today);
    }

    #[test]
    fn test_status_serializes_camel_case() {
        let status = FeedingStatus {
            relevant_date: date(2024, 1, 15),
            total_events: 4,
            completed_events: 3,
            percentage: 75.0,
            is_complete: false,
        };
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"relevantDate\":\"2024-01-15\""));
        assert!(json.contains("\"totalEvents\":4"));
        assert!(json.contains("\"isComplete\":false"));
    }
}
