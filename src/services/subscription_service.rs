use crate::{
    config::Config,
    domain::{
        entities::{standard_holidays, Calendar, SlaRule, SlaRuleDraft, TimeRange, TrackerConfiguration},
        errors::{DomainError, DomainResult},
        ports::{
            calendar_repository::CalendarRepository,
            configuration_repository::ConfigurationRepository,
        },
    },
};
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_SLA_NAME: &str = "Closing";
pub const DEFAULT_SLA_DESCRIPTION: &str = "Closing : Open->Closed";
pub const DEFAULT_START_STATUS: &str = "OPEN";
pub const DEFAULT_STOP_STATUS: &str = "CLOSED";

/// Service wiring subscriptions to their calendar and SLA rules, including
/// first-use provisioning of defaults
#[derive(Clone)]
pub struct SubscriptionService {
    config: Config,
    calendar_repo: Arc<dyn CalendarRepository>,
    configuration_repo: Arc<dyn ConfigurationRepository>,
}

impl SubscriptionService {
    pub fn new(
        config: Config,
        calendar_repo: Arc<dyn CalendarRepository>,
        configuration_repo: Arc<dyn ConfigurationRepository>,
    ) -> Self {
        Self {
            config,
            calendar_repo,
            configuration_repo,
        }
    }

    /// Configure a subscription on first use.
    ///
    /// Measures against the default calendar (created and seeded when none
    /// exists yet) and gets the default "Closing" rule. A subscription that is
    /// already configured is returned unchanged.
    pub async fn provision(&self, subscription_id: &str) -> DomainResult<TrackerConfiguration> {
        if let Some(existing) = self
            .configuration_repo
            .get_configuration(subscription_id)
            .await?
        {
            return Ok(existing);
        }

        let calendar = self.default_calendar().await?;
        let configuration = TrackerConfiguration::new(subscription_id.to_string(), calendar.id.clone());
        let rule = SlaRule::new(self.default_sla_draft())?;
        match self
            .configuration_repo
            .create_configuration(&configuration, std::slice::from_ref(&rule))
            .await
        {
            Ok(()) => {}
            Err(DomainError::Conflict(_)) => {
                // Provisioned concurrently, rules included
                return self.get_configuration(subscription_id).await;
            }
            Err(e) => return Err(e),
        }

        info!(
            "Provisioned subscription {} with calendar {} and SLA rule {}",
            subscription_id, calendar.name, rule.name
        );
        self.get_configuration(subscription_id).await
    }

    pub async fn get_configuration(&self, subscription_id: &str) -> DomainResult<TrackerConfiguration> {
        self.configuration_repo
            .get_configuration(subscription_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "Configuration of subscription {} not found",
                    subscription_id
                ))
            })
    }

    /// Measure a subscription against another calendar
    pub async fn set_calendar(&self, subscription_id: &str, calendar_id: &str) -> DomainResult<()> {
        self.configuration_repo
            .set_calendar(subscription_id, calendar_id)
            .await?;
        info!(
            "Subscription {} now uses calendar {}",
            subscription_id, calendar_id
        );
        Ok(())
    }

    /// Drop a subscription's configuration and its SLA rules. Calendars stay.
    pub async fn delete(&self, subscription_id: &str) -> DomainResult<()> {
        self.configuration_repo
            .delete_configuration(subscription_id)
            .await?;
        info!("Deleted configuration of subscription {}", subscription_id);
        Ok(())
    }

    async fn default_calendar(&self) -> DomainResult<Arc<Calendar>> {
        if let Some(calendar) = self.calendar_repo.get_default_calendar().await? {
            return Ok(calendar);
        }

        let mut calendar = Calendar::new(
            self.config.default_calendar_name.clone(),
            vec![TimeRange::new(
                self.config.default_business_start,
                self.config.default_business_end,
            )],
        )?;
        calendar.is_default = true;
        for holiday in standard_holidays(&self.config.holiday_years) {
            calendar.add_holiday(holiday.date, holiday.name);
        }

        match self.calendar_repo.create_calendar(&calendar).await {
            Ok(()) => {
                info!(
                    "Created default calendar {} with {} holiday(s)",
                    calendar.name,
                    calendar.holidays().len()
                );
                Ok(Arc::new(calendar))
            }
            Err(DomainError::Conflict(reason)) => {
                warn!("Default calendar created concurrently: {}", reason);
                self.calendar_repo
                    .get_default_calendar()
                    .await?
                    .ok_or(DomainError::Conflict(reason))
            }
            Err(e) => Err(e),
        }
    }

    fn default_sla_draft(&self) -> SlaRuleDraft {
        SlaRuleDraft {
            name: DEFAULT_SLA_NAME.to_string(),
            description: Some(DEFAULT_SLA_DESCRIPTION.to_string()),
            start: vec![DEFAULT_START_STATUS.to_string()],
            stop: vec![DEFAULT_STOP_STATUS.to_string()],
            threshold_ms: self.config.default_threshold_ms,
            ..Default::default()
        }
    }
}
