use crate::domain::entities::{Holiday, TimeRange};
use crate::domain::errors::{DomainError, DomainResult, ValidationError};
use crate::domain::services::business_hours_validator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Business-time profile: the daily working pattern applied to every
/// non-holiday day, plus holiday exceptions.
///
/// Ranges are kept sorted by start and never overlap; holidays are kept
/// sorted by date with at most one entry per date. Both invariants are only
/// maintained through the mutating methods below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    pub id: String,
    pub name: String,
    pub is_default: bool,
    ranges: Vec<TimeRange>,
    holidays: Vec<Holiday>,
    pub created_at: String,
    pub updated_at: String,
}

impl Calendar {
    /// Create a calendar from an initial set of ranges. At least one range is
    /// required and each one is validated against the others.
    pub fn new(name: String, ranges: Vec<TimeRange>) -> Result<Self, ValidationError> {
        let now = chrono::Utc::now().to_rfc3339();
        let mut calendar = Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            is_default: false,
            ranges: Vec::with_capacity(ranges.len()),
            holidays: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        };
        if ranges.is_empty() {
            return Err(ValidationError::NoBusinessHours);
        }
        for range in ranges {
            calendar.add_range(range)?;
        }
        Ok(calendar)
    }

    /// Parse a JSON snapshot, re-checking every invariant.
    pub fn from_json(json_str: &str) -> Result<Self, ValidationError> {
        let raw: Calendar = serde_json::from_str(json_str)
            .map_err(|e| ValidationError::InvalidSnapshot(e.to_string()))?;

        let mut calendar = Calendar::new(raw.name, raw.ranges)?;
        calendar.id = raw.id;
        calendar.is_default = raw.is_default;
        calendar.created_at = raw.created_at;
        calendar.updated_at = raw.updated_at;
        for holiday in raw.holidays {
            calendar.insert_holiday(holiday);
        }
        Ok(calendar)
    }

    pub fn to_json(&self) -> Result<String, ValidationError> {
        serde_json::to_string(self).map_err(|e| ValidationError::InvalidSnapshot(e.to_string()))
    }

    pub fn ranges(&self) -> &[TimeRange] {
        &self.ranges
    }

    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    pub fn range(&self, range_id: &str) -> Option<&TimeRange> {
        self.ranges.iter().find(|r| r.id == range_id)
    }

    /// Validate and insert a range, keeping the set ordered by start.
    pub fn add_range(&mut self, range: TimeRange) -> Result<String, ValidationError> {
        business_hours_validator::validate(&range, &self.ranges)?;
        let id = range.id.clone();
        let position = self.ranges.partition_point(|r| r.start < range.start);
        self.ranges.insert(position, range);
        self.touch();
        Ok(id)
    }

    /// Move an existing range, validating against every other range.
    pub fn update_range(&mut self, range_id: &str, start: u64, end: u64) -> DomainResult<()> {
        let index = self.index_of(range_id)?;
        let candidate = TimeRange {
            id: range_id.to_string(),
            start,
            end,
        };
        business_hours_validator::validate(
            &candidate,
            self.ranges.iter().filter(|r| r.id != range_id),
        )?;
        self.ranges.remove(index);
        let position = self.ranges.partition_point(|r| r.start < candidate.start);
        self.ranges.insert(position, candidate);
        self.touch();
        Ok(())
    }

    /// Remove a range. The last remaining range cannot be removed.
    pub fn remove_range(&mut self, range_id: &str) -> DomainResult<TimeRange> {
        let index = self.index_of(range_id)?;
        if self.ranges.len() == 1 {
            return Err(DomainError::LastRangeRemoval);
        }
        let removed = self.ranges.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Add a holiday, or rename the one already registered on that date.
    pub fn add_holiday(&mut self, date: NaiveDate, name: String) -> &Holiday {
        let index = self.insert_holiday(Holiday::new(name, date));
        self.touch();
        &self.holidays[index]
    }

    pub fn remove_holiday(&mut self, date: NaiveDate) -> DomainResult<Holiday> {
        let index = self
            .holidays
            .binary_search_by_key(&date, |h| h.date)
            .map_err(|_| DomainError::NotFound(format!("Holiday on {} not found", date)))?;
        let removed = self.holidays.remove(index);
        self.touch();
        Ok(removed)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.binary_search_by_key(&date, |h| h.date).is_ok()
    }

    /// Every non-holiday day carries the same working pattern.
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !self.is_holiday(date)
    }

    /// Total business milliseconds in a full business day.
    pub fn daily_business_millis(&self) -> u64 {
        self.ranges.iter().map(TimeRange::duration).sum()
    }

    fn insert_holiday(&mut self, holiday: Holiday) -> usize {
        match self.holidays.binary_search_by_key(&holiday.date, |h| h.date) {
            Ok(index) => {
                self.holidays[index].name = holiday.name;
                index
            }
            Err(index) => {
                self.holidays.insert(index, holiday);
                index
            }
        }
    }

    fn index_of(&self, range_id: &str) -> DomainResult<usize> {
        self.ranges
            .iter()
            .position(|r| r.id == range_id)
            .ok_or_else(|| DomainError::NotFound(format!("Business hours {} not found", range_id)))
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
