use crate::domain::entities::TrackedIssue;
use crate::domain::errors::{Field, ValidationError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::OnceLock;

// ===== SLA Rule =====

/// Named commitment: which statuses start, pause and stop the clock, and the
/// business-duration budget in milliseconds (`0` means tracking only).
///
/// Status sets are normalized (trimmed, uppercased, sorted). Issue filters
/// (`types`, `priorities`, `resolutions`) are trimmed and sorted but keep their
/// case; an empty filter matches every issue. Both are only changed through
/// [`SlaRule::apply`], and deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SlaRuleRecord")]
pub struct SlaRule {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    start: BTreeSet<String>,
    pause: BTreeSet<String>,
    stop: BTreeSet<String>,
    pub threshold_ms: u64,
    types: BTreeSet<String>,
    priorities: BTreeSet<String>,
    resolutions: BTreeSet<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Serialized form of a rule, trusted only after [`SlaRule::apply`] accepts it.
#[derive(Deserialize)]
struct SlaRuleRecord {
    id: String,
    name: String,
    description: Option<String>,
    start: Vec<String>,
    #[serde(default)]
    pause: Vec<String>,
    stop: Vec<String>,
    #[serde(default)]
    threshold_ms: u64,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    priorities: Vec<String>,
    #[serde(default)]
    resolutions: Vec<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<SlaRuleRecord> for SlaRule {
    type Error = ValidationError;

    fn try_from(record: SlaRuleRecord) -> Result<Self, Self::Error> {
        let mut rule = SlaRule::new(SlaRuleDraft {
            name: record.name,
            description: record.description,
            start: record.start,
            pause: record.pause,
            stop: record.stop,
            threshold_ms: record.threshold_ms,
            types: record.types,
            priorities: record.priorities,
            resolutions: record.resolutions,
        })?;
        rule.id = record.id;
        rule.created_at = record.created_at;
        rule.updated_at = record.updated_at;
        Ok(rule)
    }
}

impl SlaRule {
    /// Build a rule from a draft, normalizing and validating it.
    pub fn new(draft: SlaRuleDraft) -> Result<Self, ValidationError> {
        let now = chrono::Utc::now().to_rfc3339();
        let mut rule = Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: String::new(),
            description: None,
            start: BTreeSet::new(),
            pause: BTreeSet::new(),
            stop: BTreeSet::new(),
            threshold_ms: 0,
            types: BTreeSet::new(),
            priorities: BTreeSet::new(),
            resolutions: BTreeSet::new(),
            created_at: now.clone(),
            updated_at: now,
        };
        rule.apply(draft)?;
        Ok(rule)
    }

    /// Replace every editable field from a draft. On error the rule is left
    /// untouched.
    pub fn apply(&mut self, draft: SlaRuleDraft) -> Result<(), ValidationError> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::Required {
                field: Field::Name,
            });
        }

        let start = normalize_statuses(&draft.start);
        let pause = normalize_statuses(&draft.pause);
        let stop = normalize_statuses(&draft.stop);
        if start.is_empty() {
            return Err(ValidationError::Required {
                field: Field::Start,
            });
        }
        if stop.is_empty() {
            return Err(ValidationError::Required {
                field: Field::Stop,
            });
        }
        if !pause.is_disjoint(&start) {
            return Err(ValidationError::SlaBound {
                field: Field::Start,
            });
        }
        if !pause.is_disjoint(&stop) {
            return Err(ValidationError::SlaBound {
                field: Field::Stop,
            });
        }

        self.name = name;
        self.description = draft
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self.start = start;
        self.pause = pause;
        self.stop = stop;
        self.threshold_ms = draft.threshold_ms;
        self.types = normalize_filter(&draft.types);
        self.priorities = normalize_filter(&draft.priorities);
        self.resolutions = normalize_filter(&draft.resolutions);
        self.updated_at = chrono::Utc::now().to_rfc3339();
        Ok(())
    }

    pub fn start(&self) -> &BTreeSet<String> {
        &self.start
    }

    pub fn pause(&self) -> &BTreeSet<String> {
        &self.pause
    }

    pub fn stop(&self) -> &BTreeSet<String> {
        &self.stop
    }

    pub fn types(&self) -> &BTreeSet<String> {
        &self.types
    }

    pub fn priorities(&self) -> &BTreeSet<String> {
        &self.priorities
    }

    pub fn resolutions(&self) -> &BTreeSet<String> {
        &self.resolutions
    }

    pub fn is_start(&self, status: &str) -> bool {
        self.start.contains(normalize_status(status).as_ref())
    }

    pub fn is_pause(&self, status: &str) -> bool {
        self.pause.contains(normalize_status(status).as_ref())
    }

    pub fn is_stop(&self, status: &str) -> bool {
        self.stop.contains(normalize_status(status).as_ref())
    }

    /// Whether the issue passes the type, priority and resolution filters.
    pub fn applies_to(&self, issue: &TrackedIssue) -> bool {
        matches_filter(&self.types, issue.issue_type.as_deref())
            && matches_filter(&self.priorities, issue.priority.as_deref())
            && matches_filter(&self.resolutions, issue.resolution.as_deref())
    }
}

/// Editable fields of an SLA rule, as submitted by an administrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlaRuleDraft {
    pub name: String,
    pub description: Option<String>,
    pub start: Vec<String>,
    #[serde(default)]
    pub pause: Vec<String>,
    pub stop: Vec<String>,
    #[serde(default)]
    pub threshold_ms: u64,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub priorities: Vec<String>,
    #[serde(default)]
    pub resolutions: Vec<String>,
}

// ===== Status normalization =====

/// Trimmed, uppercased form of one status label. Borrows when the label is
/// already normalized.
pub fn normalize_status(status: &str) -> Cow<'_, str> {
    let trimmed = status.trim();
    if trimmed.chars().flat_map(char::to_uppercase).eq(trimmed.chars()) {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(trimmed.to_uppercase())
    }
}

/// Trim, uppercase, drop blanks, sort and dedupe status labels.
pub fn normalize_statuses<S: AsRef<str>>(statuses: &[S]) -> BTreeSet<String> {
    statuses
        .iter()
        .map(|s| normalize_status(s.as_ref()).into_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Render a status set in its persisted comma-separated form.
pub fn join_statuses(statuses: &BTreeSet<String>) -> String {
    statuses.iter().cloned().collect::<Vec<_>>().join(",")
}

fn normalize_filter<S: AsRef<str>>(values: &[S]) -> BTreeSet<String> {
    values
        .iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn matches_filter(filter: &BTreeSet<String>, value: Option<&str>) -> bool {
    if filter.is_empty() {
        return true;
    }
    match value {
        Some(value) => filter.iter().any(|f| f.eq_ignore_ascii_case(value.trim())),
        None => false,
    }
}

// ===== Threshold Parsing Utility =====

/// Parse a threshold like "0", "90s", "30m", "10h" or "2d" into milliseconds.
pub fn parse_threshold(threshold_str: &str) -> Result<u64, ValidationError> {
    static THRESHOLD_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = THRESHOLD_REGEX
        .get_or_init(|| Regex::new(r"^(\d+)(ms|s|m|h|d)?$").expect("Invalid threshold regex"));

    let trimmed = threshold_str.trim();
    let caps = re.captures(trimmed).ok_or_else(|| {
        ValidationError::InvalidThreshold(format!(
            "{}. Expected format: <number><ms|s|m|h|d>",
            threshold_str
        ))
    })?;

    let number: u64 = caps[1]
        .parse()
        .map_err(|_| ValidationError::InvalidThreshold(format!("Invalid number: {}", &caps[1])))?;

    let factor: u64 = match caps.get(2).map(|m| m.as_str()) {
        None | Some("ms") => 1,
        Some("s") => 1_000,
        Some("m") => 60 * 1_000,
        Some("h") => 60 * 60 * 1_000,
        Some("d") => 24 * 60 * 60 * 1_000,
        Some(unit) => {
            return Err(ValidationError::InvalidThreshold(format!(
                "Invalid unit: {}",
                unit
            )))
        }
    };

    number
        .checked_mul(factor)
        .ok_or_else(|| ValidationError::InvalidThreshold(format!("{} is too large", threshold_str)))
}
