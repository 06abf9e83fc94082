use super::{Arena, MemoryStore};
use crate::domain::entities::SlaRule;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::sla_rule_repository::SlaRuleRepository;
use std::sync::Arc;

#[async_trait::async_trait]
impl SlaRuleRepository for MemoryStore {
    async fn create_sla_rule(&self, subscription_id: &str, rule: &SlaRule) -> DomainResult<()> {
        let mut arena = self.inner.write().await;
        if arena.sla_rules.contains_key(&rule.id) {
            return Err(DomainError::Conflict(format!(
                "SLA rule {} already exists",
                rule.id
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
        configuration.sla_rule_ids.push(rule.id.clone());
        configuration.updated_at = chrono::Utc::now().to_rfc3339();
        arena.sla_rules.insert(rule.id.clone(), Arc::new(rule.clone()));
        Ok(())
    }

    async fn get_sla_rule(
        &self,
        subscription_id: &str,
        rule_id: &str,
    ) -> DomainResult<Option<Arc<SlaRule>>> {
        let arena = self.inner.read().await;
        if !arena.owns_rule(subscription_id, rule_id) {
            return Ok(None);
        }
        Ok(arena.sla_rules.get(rule_id).cloned())
    }

    async fn list_sla_rules(&self, subscription_id: &str) -> DomainResult<Vec<Arc<SlaRule>>> {
        let arena = self.inner.read().await;
        let Some(configuration) = arena.configurations.get(subscription_id) else {
            return Ok(Vec::new());
        };
        Ok(configuration
            .sla_rule_ids
            .iter()
            .filter_map(|id| arena.sla_rules.get(id).cloned())
            .collect())
    }

    async fn update_sla_rule(&self, subscription_id: &str, rule: &SlaRule) -> DomainResult<()> {
        let mut arena = self.inner.write().await;
        if !arena.owns_rule(subscription_id, &rule.id) {
            return Err(rule_not_found(&rule.id));
        }
        let slot = arena
            .sla_rules
            .get_mut(&rule.id)
            .ok_or_else(|| rule_not_found(&rule.id))?;
        *slot = Arc::new(rule.clone());
        Ok(())
    }

    async fn delete_sla_rule(&self, subscription_id: &str, rule_id: &str) -> DomainResult<()> {
        let mut arena = self.inner.write().await;
        if !arena.owns_rule(subscription_id, rule_id) {
            return Err(rule_not_found(rule_id));
        }
        arena.sla_rules.remove(rule_id);
        if let Some(configuration) = arena.configurations.get_mut(subscription_id) {
            configuration.sla_rule_ids.retain(|id| id != rule_id);
            configuration.updated_at = chrono::Utc::now().to_rfc3339();
        }
        Ok(())
    }
}

impl Arena {
    fn owns_rule(&self, subscription_id: &str, rule_id: &str) -> bool {
        self.configurations
            .get(subscription_id)
            .is_some_and(|c| c.sla_rule_ids.iter().any(|id| id == rule_id))
    }
}

fn rule_not_found(rule_id: &str) -> DomainError {
    DomainError::NotFound(format!("SLA rule {} not found", rule_id))
}
