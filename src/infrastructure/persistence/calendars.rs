use super::{Arena, MemoryStore};
use crate::domain::entities::{Calendar, Holiday, TimeRange};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::calendar_repository::CalendarRepository;
use chrono::NaiveDate;
use std::sync::Arc;

impl Arena {
    /// Copy-on-write access to a stored calendar.
    fn calendar_mut(&mut self, calendar_id: &str) -> DomainResult<&mut Calendar> {
        self.calendars
            .get_mut(calendar_id)
            .map(Arc::make_mut)
            .ok_or_else(|| DomainError::NotFound(format!("Calendar {} not found", calendar_id)))
    }
}

#[async_trait::async_trait]
impl CalendarRepository for MemoryStore {
    async fn create_calendar(&self, calendar: &Calendar) -> DomainResult<()> {
        let mut arena = self.inner.write().await;
        if arena.calendars.contains_key(&calendar.id) {
            return Err(DomainError::Conflict(format!(
                "Calendar {} already exists",
                calendar.id
            )));
        }
        if calendar.is_default && arena.calendars.values().any(|c| c.is_default) {
            return Err(DomainError::Conflict(
                "A default calendar already exists".to_string(),
            ));
        }
        arena
            .calendars
            .insert(calendar.id.clone(), Arc::new(calendar.clone()));
        Ok(())
    }

    async fn get_calendar(&self, calendar_id: &str) -> DomainResult<Option<Arc<Calendar>>> {
        let arena = self.inner.read().await;
        Ok(arena.calendars.get(calendar_id).cloned())
    }

    async fn get_default_calendar(&self) -> DomainResult<Option<Arc<Calendar>>> {
        let arena = self.inner.read().await;
        Ok(arena.calendars.values().find(|c| c.is_default).cloned())
    }

    async fn list_calendars(&self) -> DomainResult<Vec<Arc<Calendar>>> {
        let arena = self.inner.read().await;
        let mut calendars: Vec<Arc<Calendar>> = arena.calendars.values().cloned().collect();
        calendars.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(calendars)
    }

    async fn rename_calendar(&self, calendar_id: &str, name: &str) -> DomainResult<()> {
        let mut arena = self.inner.write().await;
        let calendar = arena.calendar_mut(calendar_id)?;
        calendar.name = name.to_string();
        calendar.updated_at = chrono::Utc::now().to_rfc3339();
        Ok(())
    }

    async fn delete_calendar(&self, calendar_id: &str) -> DomainResult<()> {
        let mut arena = self.inner.write().await;
        if !arena.calendars.contains_key(calendar_id) {
            return Err(DomainError::NotFound(format!(
                "Calendar {} not found",
                calendar_id
            )));
        }
        let usage = arena.calendar_usage(calendar_id);
        if usage > 0 {
            return Err(DomainError::Referenced(format!(
                "Calendar {} is used by {} configuration(s)",
                calendar_id, usage
            )));
        }
        arena.calendars.remove(calendar_id);
        Ok(())
    }

    async fn add_range(&self, calendar_id: &str, range: TimeRange) -> DomainResult<String> {
        let mut arena = self.inner.write().await;
        let calendar = arena.calendar_mut(calendar_id)?;
        Ok(calendar.add_range(range)?)
    }

    async fn update_range(
        &self,
        calendar_id: &str,
        range_id: &str,
        start: u64,
        end: u64,
    ) -> DomainResult<()> {
        let mut arena = self.inner.write().await;
        arena
            .calendar_mut(calendar_id)?
            .update_range(range_id, start, end)
    }

    async fn remove_range(&self, calendar_id: &str, range_id: &str) -> DomainResult<()> {
        let mut arena = self.inner.write().await;
        arena.calendar_mut(calendar_id)?.remove_range(range_id)?;
        Ok(())
    }

    async fn add_holiday(
        &self,
        calendar_id: &str,
        date: NaiveDate,
        name: &str,
    ) -> DomainResult<Holiday> {
        let mut arena = self.inner.write().await;
        let calendar = arena.calendar_mut(calendar_id)?;
        Ok(calendar.add_holiday(date, name.to_string()).clone())
    }

    async fn remove_holiday(&self, calendar_id: &str, date: NaiveDate) -> DomainResult<()> {
        let mut arena = self.inner.write().await;
        arena.calendar_mut(calendar_id)?.remove_holiday(date)?;
        Ok(())
    }
}
