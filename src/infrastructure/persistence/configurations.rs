use super::MemoryStore;
use crate::domain::entities::{SlaRule, TrackerConfiguration};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::configuration_repository::ConfigurationRepository;
use std::sync::Arc;

#[async_trait::async_trait]
impl ConfigurationRepository for MemoryStore {
    async fn create_configuration(
        &self,
        configuration: &TrackerConfiguration,
        rules: &[SlaRule],
    ) -> DomainResult<()> {
        let mut arena = self.inner.write().await;
        if arena
            .configurations
            .contains_key(&configuration.subscription_id)
        {
            return Err(DomainError::Conflict(format!(
                "Subscription {} is already configured",
                configuration.subscription_id
            )));
        }
        if !arena.calendars.contains_key(&configuration.calendar_id) {
            return Err(DomainError::NotFound(format!(
                "Calendar {} not found",
                configuration.calendar_id
            )));
        }
        if let Some(rule) = rules.iter().find(|r| arena.sla_rules.contains_key(&r.id)) {
            return Err(DomainError::Conflict(format!(
                "SLA rule {} already exists",
                rule.id
            )));
        }

        let mut configuration = configuration.clone();
        for rule in rules {
            configuration.sla_rule_ids.push(rule.id.clone());
            arena.sla_rules.insert(rule.id.clone(), Arc::new(rule.clone()));
        }
        arena
            .configurations
            .insert(configuration.subscription_id.clone(), configuration);
        Ok(())
    }

    async fn get_configuration(
        &self,
        subscription_id: &str,
    ) -> DomainResult<Option<TrackerConfiguration>> {
        let arena = self.inner.read().await;
        Ok(arena.configurations.get(subscription_id).cloned())
    }

    async fn set_calendar(&self, subscription_id: &str, calendar_id: &str) -> DomainResult<()> {
        let mut arena = self.inner.write().await;
        if !arena.calendars.contains_key(calendar_id) {
            return Err(DomainError::NotFound(format!(
                "Calendar {} not found",
                calendar_id
            )));
        }
        let configuration = arena
            .configurations
            .get_mut(subscription_id)
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "Configuration of subscription {} not found",
                    subscription_id
                ))
            })?;
        configuration.calendar_id = calendar_id.to_string();
        configuration.updated_at = chrono::Utc::now().to_rfc3339();
        Ok(())
    }

    async fn delete_configuration(&self, subscription_id: &str) -> DomainResult<()> {
        let mut arena = self.inner.write().await;
        let configuration = arena
            .configurations
            .remove(subscription_id)
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "Configuration of subscription {} not found",
                    subscription_id
                ))
            })?;
        for rule_id in &configuration.sla_rule_ids {
            arena.sla_rules.remove(rule_id);
        }
        Ok(())
    }
}
