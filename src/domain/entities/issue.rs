use crate::domain::entities::normalize_status;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Observed status transition of a tracked issue. [`IssueEvent::new`] stores
/// the status normalized so rule lookups do not allocate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueEvent {
    pub status: String,
    pub at: NaiveDateTime,
}

impl IssueEvent {
    pub fn new(status: impl Into<String>, at: NaiveDateTime) -> Self {
        let status: String = status.into();
        let normalized = match normalize_status(&status) {
            Cow::Borrowed(s) if s.len() == status.len() => None,
            other => Some(other.into_owned()),
        };
        Self {
            status: normalized.unwrap_or(status),
            at,
        }
    }
}

/// Issue as supplied by the event source: its filter attributes and its
/// status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedIssue {
    pub key: String,
    pub issue_type: Option<String>,
    pub priority: Option<String>,
    pub resolution: Option<String>,
    pub events: Vec<IssueEvent>,
}

impl TrackedIssue {
    pub fn new(key: String, events: Vec<IssueEvent>) -> Self {
        Self {
            key,
            issue_type: None,
            priority: None,
            resolution: None,
            events,
        }
    }

    /// Put the history in time order. The sort is stable, so events sharing a
    /// timestamp keep their insertion order.
    pub fn sort_events(&mut self) {
        self.events.sort_by_key(|e| e.at);
    }
}
