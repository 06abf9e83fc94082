#![allow(dead_code)]
use sla_engine::{
    domain::{
        entities::TrackedIssue,
        errors::DomainResult,
        ports::{
            calendar_repository::CalendarRepository,
            configuration_repository::ConfigurationRepository, event_source::EventSource,
            sla_rule_repository::SlaRuleRepository,
        },
    },
    CalendarService, Config, MemoryStore, SlaService, SubscriptionService,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Event source serving a fixed set of issues per subscription
#[derive(Default)]
pub struct FixtureEventSource {
    issues: HashMap<String, Vec<TrackedIssue>>,
}

impl FixtureEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(mut self, subscription_id: &str, issue: TrackedIssue) -> Self {
        self.issues
            .entry(subscription_id.to_string())
            .or_default()
            .push(issue);
        self
    }
}

#[async_trait::async_trait]
impl EventSource for FixtureEventSource {
    async fn fetch_issues(&self, subscription_id: &str) -> DomainResult<Vec<TrackedIssue>> {
        Ok(self.issues.get(subscription_id).cloned().unwrap_or_default())
    }

    async fn fetch_issue(
        &self,
        subscription_id: &str,
        issue_key: &str,
    ) -> DomainResult<Option<TrackedIssue>> {
        Ok(self
            .issues
            .get(subscription_id)
            .and_then(|issues| issues.iter().find(|i| i.key == issue_key).cloned()))
    }
}

/// Store plus every service wired on top of it
pub struct TestStore {
    pub store: MemoryStore,
    pub calendars: CalendarService,
    pub slas: SlaService,
    pub subscriptions: SubscriptionService,
}

pub fn test_config() -> Config {
    Config {
        holiday_years: vec![2026],
        ..Config::default()
    }
}

pub fn setup_test_store() -> TestStore {
    setup_test_store_with(FixtureEventSource::new())
}

pub fn setup_test_store_with(event_source: FixtureEventSource) -> TestStore {
    let store = MemoryStore::new();
    let calendar_repo: Arc<dyn CalendarRepository> = Arc::new(store.clone());
    let configuration_repo: Arc<dyn ConfigurationRepository> = Arc::new(store.clone());
    let sla_repo: Arc<dyn SlaRuleRepository> = Arc::new(store.clone());

    TestStore {
        calendars: CalendarService::new(calendar_repo.clone()),
        slas: SlaService::new(
            sla_repo,
            configuration_repo.clone(),
            calendar_repo.clone(),
            Arc::new(event_source),
        ),
        subscriptions: SubscriptionService::new(
            test_config(),
            calendar_repo,
            configuration_repo,
        ),
        store,
    }
}
