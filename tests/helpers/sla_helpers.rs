#![allow(dead_code)]
use chrono::{NaiveDate, NaiveDateTime};
use sla_engine::domain::entities::{
    Calendar, IssueEvent, SlaRuleDraft, TimeRange, TrackedIssue, MILLIS_PER_HOUR,
};

pub const HOUR: u64 = MILLIS_PER_HOUR;

/// Monday 2 March 2026 at the given time
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    on(2, hour, minute)
}

/// Given day of March 2026 at the given time
pub fn on(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, day)
        .expect("valid date")
        .and_hms_opt(hour, minute, 0)
        .expect("valid time")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Calendar with a single 08:00-18:00 range and no holiday
pub fn office_calendar() -> Calendar {
    Calendar::new("Default".to_string(), vec![TimeRange::from_hours(8, 18)])
        .expect("valid calendar")
}

pub fn events(history: &[(&str, NaiveDateTime)]) -> Vec<IssueEvent> {
    history
        .iter()
        .map(|(status, time)| IssueEvent::new(*status, *time))
        .collect()
}

pub fn issue(key: &str, history: &[(&str, NaiveDateTime)]) -> TrackedIssue {
    TrackedIssue::new(key.to_string(), events(history))
}

pub fn draft(
    name: &str,
    start: &[&str],
    pause: &[&str],
    stop: &[&str],
    threshold_ms: u64,
) -> SlaRuleDraft {
    let owned = |values: &[&str]| values.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    SlaRuleDraft {
        name: name.to_string(),
        description: None,
        start: owned(start),
        pause: owned(pause),
        stop: owned(stop),
        threshold_ms,
        ..Default::default()
    }
}
