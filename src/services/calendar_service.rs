use crate::{
    domain::{
        entities::{Calendar, Holiday, TimeRange},
        errors::{DomainError, DomainResult, Field, ValidationError},
        ports::calendar_repository::CalendarRepository,
    },
    infrastructure::observability::CALENDAR_RANGE_REJECTIONS_TOTAL,
};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

/// Service for managing calendars, their business hours and holidays
#[derive(Clone)]
pub struct CalendarService {
    calendar_repo: Arc<dyn CalendarRepository>,
}

impl CalendarService {
    pub fn new(calendar_repo: Arc<dyn CalendarRepository>) -> Self {
        Self { calendar_repo }
    }

    // ========================================
    // Calendar Management
    // ========================================

    /// Create a calendar with its initial business hours
    pub async fn create_calendar(
        &self,
        name: String,
        ranges: Vec<(u64, u64)>,
    ) -> DomainResult<Arc<Calendar>> {
        let ranges = ranges
            .into_iter()
            .map(|(start, end)| TimeRange::new(start, end))
            .collect();
        let calendar = Calendar::new(name, ranges).map_err(|e| {
            record_rejection(&e);
            e
        })?;
        self.calendar_repo.create_calendar(&calendar).await?;

        info!("Created calendar: {} ({})", calendar.name, calendar.id);
        Ok(Arc::new(calendar))
    }

    /// Get a calendar snapshot by ID
    pub async fn get_calendar(&self, calendar_id: &str) -> DomainResult<Arc<Calendar>> {
        self.calendar_repo
            .get_calendar(calendar_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Calendar {} not found", calendar_id)))
    }

    /// List all calendars ordered by name
    pub async fn list_calendars(&self) -> DomainResult<Vec<Arc<Calendar>>> {
        self.calendar_repo.list_calendars().await
    }

    pub async fn rename_calendar(&self, calendar_id: &str, name: &str) -> DomainResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required { field: Field::Name }.into());
        }
        self.calendar_repo.rename_calendar(calendar_id, name).await?;
        info!("Renamed calendar {} to {}", calendar_id, name);
        Ok(())
    }

    /// Delete a calendar no configuration refers to
    pub async fn delete_calendar(&self, calendar_id: &str) -> DomainResult<()> {
        match self.calendar_repo.delete_calendar(calendar_id).await {
            Ok(()) => {
                info!("Deleted calendar: {}", calendar_id);
                Ok(())
            }
            Err(e @ DomainError::Referenced(_)) => {
                warn!("Refused to delete calendar {}: {}", calendar_id, e);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    // ========================================
    // Business Hours
    // ========================================

    /// Add a business hours range, returning its ID
    pub async fn add_range(&self, calendar_id: &str, start: u64, end: u64) -> DomainResult<String> {
        let result = self
            .calendar_repo
            .add_range(calendar_id, TimeRange::new(start, end))
            .await;
        let range_id = self.observe_range_write(calendar_id, result)?;
        info!(
            "Added business hours {}..{} to calendar {} ({})",
            start, end, calendar_id, range_id
        );
        Ok(range_id)
    }

    pub async fn update_range(
        &self,
        calendar_id: &str,
        range_id: &str,
        start: u64,
        end: u64,
    ) -> DomainResult<()> {
        let result = self
            .calendar_repo
            .update_range(calendar_id, range_id, start, end)
            .await;
        self.observe_range_write(calendar_id, result)?;
        info!(
            "Updated business hours {} of calendar {} to {}..{}",
            range_id, calendar_id, start, end
        );
        Ok(())
    }

    /// Remove a business hours range; the last one of a calendar is kept
    pub async fn remove_range(&self, calendar_id: &str, range_id: &str) -> DomainResult<()> {
        match self.calendar_repo.remove_range(calendar_id, range_id).await {
            Ok(()) => {
                info!(
                    "Removed business hours {} from calendar {}",
                    range_id, calendar_id
                );
                Ok(())
            }
            Err(DomainError::LastRangeRemoval) => {
                warn!(
                    "Refused to remove the last business hours of calendar {}",
                    calendar_id
                );
                metrics::counter!(CALENDAR_RANGE_REJECTIONS_TOTAL, "reason" => "last_range")
                    .increment(1);
                Err(DomainError::LastRangeRemoval)
            }
            Err(e) => Err(e),
        }
    }

    // ========================================
    // Holidays
    // ========================================

    pub async fn add_holiday(
        &self,
        calendar_id: &str,
        date: NaiveDate,
        name: &str,
    ) -> DomainResult<Holiday> {
        let holiday = self
            .calendar_repo
            .add_holiday(calendar_id, date, name.trim())
            .await?;
        info!("Added holiday {} ({}) to calendar {}", holiday.name, date, calendar_id);
        Ok(holiday)
    }

    pub async fn remove_holiday(&self, calendar_id: &str, date: NaiveDate) -> DomainResult<()> {
        self.calendar_repo.remove_holiday(calendar_id, date).await?;
        info!("Removed holiday {} from calendar {}", date, calendar_id);
        Ok(())
    }

    /// Whether business time is counted on the given date
    pub async fn is_business_day(&self, calendar_id: &str, date: NaiveDate) -> DomainResult<bool> {
        Ok(self.get_calendar(calendar_id).await?.is_business_day(date))
    }

    fn observe_range_write<T>(&self, calendar_id: &str, result: DomainResult<T>) -> DomainResult<T> {
        if let Err(DomainError::Validation(e)) = &result {
            warn!(
                "Rejected business hours for calendar {}: {}",
                calendar_id, e
            );
            record_rejection(e);
        }
        result
    }
}

fn record_rejection(error: &ValidationError) {
    let reason = match error {
        ValidationError::Overlap { .. } => "overlap",
        ValidationError::InvalidRange { .. } => "invalid_range",
        ValidationError::NoBusinessHours => "no_business_hours",
        _ => "other",
    };
    metrics::counter!(CALENDAR_RANGE_REJECTIONS_TOTAL, "reason" => reason).increment(1);
}
