use crate::domain::entities::{
    normalize_status, Calendar, IssueEvent, SlaClock, SlaRule, SlaState, SlaStatus, TrackedIssue,
};
use crate::domain::services::business_time::business_millis_between;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy)]
struct Fold {
    clock: SlaClock,
    elapsed_ms: u64,
    started_at: Option<NaiveDateTime>,
}

/// Advance the clock by one event.
///
/// `NOT_STARTED -> RUNNING <-> PAUSED -> STOPPED`; `STOPPED` is terminal and
/// any status the rule does not name leaves the clock as it is. A repeated
/// start while running does not reset anything.
fn step(calendar: &Calendar, rule: &SlaRule, acc: Fold, event: &IssueEvent) -> Fold {
    let normalized = normalize_status(&event.status);
    let status = normalized.as_ref();
    let mut next = acc;
    match acc.clock {
        SlaClock::NotStarted if rule.is_start(status) => {
            next.clock = SlaClock::Running { since: event.at };
            next.started_at = Some(event.at);
        }
        SlaClock::Running { since } if rule.is_pause(status) => {
            next.elapsed_ms += business_millis_between(calendar, since, event.at);
            next.clock = SlaClock::Paused;
        }
        SlaClock::Running { since } if rule.is_stop(status) => {
            next.elapsed_ms += business_millis_between(calendar, since, event.at);
            next.clock = SlaClock::Stopped { at: event.at };
        }
        SlaClock::Paused if rule.is_start(status) => {
            next.clock = SlaClock::Running { since: event.at };
        }
        SlaClock::Paused if rule.is_stop(status) => {
            next.clock = SlaClock::Stopped { at: event.at };
        }
        _ => {}
    }
    next
}

/// Evaluate a rule over a time-ordered event history.
///
/// A segment still open at the end of the history is counted up to `now`;
/// such a state is provisional (see [`SlaState::is_final`]). The same inputs
/// always give the same state.
pub fn evaluate(
    calendar: &Calendar,
    rule: &SlaRule,
    events: &[IssueEvent],
    now: NaiveDateTime,
) -> SlaState {
    let initial = Fold {
        clock: SlaClock::NotStarted,
        elapsed_ms: 0,
        started_at: None,
    };
    let mut fold = events
        .iter()
        .fold(initial, |acc, event| step(calendar, rule, acc, event));

    if let SlaClock::Running { since } = fold.clock {
        fold.elapsed_ms += business_millis_between(calendar, since, now);
    }

    let stopped_at = match fold.clock {
        SlaClock::Stopped { at } => Some(at),
        _ => None,
    };

    SlaState {
        elapsed_business_ms: fold.elapsed_ms,
        status: fold.clock.status(),
        breached: rule.threshold_ms > 0 && fold.elapsed_ms > rule.threshold_ms,
        threshold_ms: rule.threshold_ms,
        started_at: fold.started_at,
        stopped_at,
    }
}

/// Evaluate a rule over an issue, honouring the rule's issue filters. An
/// issue the rule does not apply to never starts its clock.
pub fn evaluate_issue(
    calendar: &Calendar,
    rule: &SlaRule,
    issue: &TrackedIssue,
    now: NaiveDateTime,
) -> SlaState {
    if !rule.applies_to(issue) {
        return SlaState {
            elapsed_business_ms: 0,
            status: SlaStatus::NotStarted,
            breached: false,
            threshold_ms: rule.threshold_ms,
            started_at: None,
            stopped_at: None,
        };
    }
    evaluate(calendar, rule, &issue.events, now)
}
