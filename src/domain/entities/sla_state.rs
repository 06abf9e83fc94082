use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Clock of one SLA rule over one issue.
///
/// `Running` carries the start of the currently open segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlaClock {
    NotStarted,
    Running { since: NaiveDateTime },
    Paused,
    Stopped { at: NaiveDateTime },
}

impl SlaClock {
    pub fn status(&self) -> SlaStatus {
        match self {
            SlaClock::NotStarted => SlaStatus::NotStarted,
            SlaClock::Running { .. } => SlaStatus::Running,
            SlaClock::Paused => SlaStatus::Paused,
            SlaClock::Stopped { .. } => SlaStatus::Stopped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlaStatus {
    NotStarted,
    Running,
    Paused,
    Stopped,
}

impl std::fmt::Display for SlaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlaStatus::NotStarted => write!(f, "NOT_STARTED"),
            SlaStatus::Running => write!(f, "RUNNING"),
            SlaStatus::Paused => write!(f, "PAUSED"),
            SlaStatus::Stopped => write!(f, "STOPPED"),
        }
    }
}

impl std::str::FromStr for SlaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NOT_STARTED" => Ok(SlaStatus::NotStarted),
            "RUNNING" => Ok(SlaStatus::Running),
            "PAUSED" => Ok(SlaStatus::Paused),
            "STOPPED" => Ok(SlaStatus::Stopped),
            _ => Err(format!("Invalid SLA status: {}", s)),
        }
    }
}

/// Derived SLA state of one rule over one issue. Never stored; recomputed
/// from the event history on each query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaState {
    pub elapsed_business_ms: u64,
    pub status: SlaStatus,
    pub breached: bool,
    pub threshold_ms: u64,
    pub started_at: Option<NaiveDateTime>,
    pub stopped_at: Option<NaiveDateTime>,
}

impl SlaState {
    /// Figures only become final once the clock is stopped.
    pub fn is_final(&self) -> bool {
        self.status == SlaStatus::Stopped
    }

    /// Budget left before breach, `None` for tracking-only rules.
    pub fn remaining_ms(&self) -> Option<u64> {
        if self.threshold_ms == 0 {
            return None;
        }
        Some(self.threshold_ms.saturating_sub(self.elapsed_business_ms))
    }
}
