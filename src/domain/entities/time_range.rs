use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const MILLIS_PER_HOUR: u64 = 60 * 60 * 1000;
pub const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

/// Business hours range within one day.
///
/// Bounds are milliseconds from local midnight: `start` inclusive, `end`
/// exclusive, `0` meaning start of day and [`MILLIS_PER_DAY`] meaning midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub id: String,
    pub start: u64,
    pub end: u64,
}

impl TimeRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            start,
            end,
        }
    }

    pub fn from_hours(start_hour: u64, end_hour: u64) -> Self {
        Self::new(start_hour * MILLIS_PER_HOUR, end_hour * MILLIS_PER_HOUR)
    }

    pub fn duration(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, offset: u64) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Half-open interval overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Length of the intersection of this range with `[lo, hi)`.
    pub fn intersection_len(&self, lo: u64, hi: u64) -> u64 {
        let from = self.start.max(lo);
        let to = self.end.min(hi);
        to.saturating_sub(from)
    }
}

impl PartialOrd for TimeRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeRange {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
            .then_with(|| self.id.cmp(&other.id))
    }
}
