use crate::domain::entities::SlaRule;
use crate::domain::errors::DomainResult;
use std::sync::Arc;

/// Repository for SLA rules, each owned by one subscription configuration.
///
/// Every lookup is scoped to the owning subscription: a rule id belonging to
/// another subscription behaves as if it did not exist.
#[async_trait::async_trait]
pub trait SlaRuleRepository: Send + Sync {
    /// Store a new rule and attach it to the subscription's configuration.
    async fn create_sla_rule(&self, subscription_id: &str, rule: &SlaRule) -> DomainResult<()>;
    async fn get_sla_rule(
        &self,
        subscription_id: &str,
        rule_id: &str,
    ) -> DomainResult<Option<Arc<SlaRule>>>;
    async fn list_sla_rules(&self, subscription_id: &str) -> DomainResult<Vec<Arc<SlaRule>>>;
    async fn update_sla_rule(&self, subscription_id: &str, rule: &SlaRule) -> DomainResult<()>;
    async fn delete_sla_rule(&self, subscription_id: &str, rule_id: &str) -> DomainResult<()>;
}
