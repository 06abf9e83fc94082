use crate::domain::entities::TrackedIssue;
use crate::domain::errors::DomainResult;

/// Supplies tracked issues and their status history, typically fetched from an
/// external tracker.
#[async_trait::async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_issues(&self, subscription_id: &str) -> DomainResult<Vec<TrackedIssue>>;
    async fn fetch_issue(
        &self,
        subscription_id: &str,
        issue_key: &str,
    ) -> DomainResult<Option<TrackedIssue>>;
}
