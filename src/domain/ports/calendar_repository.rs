use crate::domain::entities::{Calendar, Holiday, TimeRange};
use crate::domain::errors::DomainResult;
use chrono::NaiveDate;
use std::sync::Arc;

/// Repository for calendars, their business hours and holidays.
///
/// Reads hand out immutable snapshots. Range writes must go through
/// [`Calendar::add_range`] / [`Calendar::update_range`] /
/// [`Calendar::remove_range`] so the non-overlap and last-range rules hold.
#[async_trait::async_trait]
pub trait CalendarRepository: Send + Sync {
    async fn create_calendar(&self, calendar: &Calendar) -> DomainResult<()>;
    async fn get_calendar(&self, calendar_id: &str) -> DomainResult<Option<Arc<Calendar>>>;
    async fn get_default_calendar(&self) -> DomainResult<Option<Arc<Calendar>>>;
    /// All calendars, ordered by name.
    async fn list_calendars(&self) -> DomainResult<Vec<Arc<Calendar>>>;
    async fn rename_calendar(&self, calendar_id: &str, name: &str) -> DomainResult<()>;
    /// Refused with `Referenced` while a configuration still uses it.
    async fn delete_calendar(&self, calendar_id: &str) -> DomainResult<()>;

    // Business hours
    async fn add_range(&self, calendar_id: &str, range: TimeRange) -> DomainResult<String>;
    async fn update_range(
        &self,
        calendar_id: &str,
        range_id: &str,
        start: u64,
        end: u64,
    ) -> DomainResult<()>;
    async fn remove_range(&self, calendar_id: &str, range_id: &str) -> DomainResult<()>;

    // Holidays
    async fn add_holiday(
        &self,
        calendar_id: &str,
        date: NaiveDate,
        name: &str,
    ) -> DomainResult<Holiday>;
    async fn remove_holiday(&self, calendar_id: &str, date: NaiveDate) -> DomainResult<()>;
}
