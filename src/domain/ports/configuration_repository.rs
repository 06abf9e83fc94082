use crate::domain::entities::{SlaRule, TrackerConfiguration};
use crate::domain::errors::DomainResult;

#[async_trait::async_trait]
pub trait ConfigurationRepository: Send + Sync {
    /// Store a configuration together with its initial rules in one write, so
    /// readers never see it without them. Fails with `Conflict` if the
    /// subscription is already configured.
    async fn create_configuration(
        &self,
        configuration: &TrackerConfiguration,
        rules: &[SlaRule],
    ) -> DomainResult<()>;
    async fn get_configuration(
        &self,
        subscription_id: &str,
    ) -> DomainResult<Option<TrackerConfiguration>>;
    async fn set_calendar(&self, subscription_id: &str, calendar_id: &str) -> DomainResult<()>;
    /// Remove the configuration together with the SLA rules it owns.
    async fn delete_configuration(&self, subscription_id: &str) -> DomainResult<()>;
}
