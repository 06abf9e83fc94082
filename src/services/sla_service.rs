use crate::{
    domain::{
        entities::{Calendar, SlaRule, SlaRuleDraft, SlaState, TrackedIssue},
        errors::{DomainError, DomainResult},
        ports::{
            calendar_repository::CalendarRepository,
            configuration_repository::ConfigurationRepository, event_source::EventSource,
            sla_rule_repository::SlaRuleRepository,
        },
        services::sla_evaluator,
    },
    infrastructure::observability::{SLA_BREACHES_TOTAL, SLA_EVALUATIONS_TOTAL},
};
use chrono::NaiveDateTime;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// State of one SLA rule over one issue
#[derive(Debug, Clone, Serialize)]
pub struct RuleEvaluation {
    pub rule_id: String,
    pub rule_name: String,
    pub state: SlaState,
}

/// Every rule of a subscription evaluated over one issue
#[derive(Debug, Clone, Serialize)]
pub struct IssueReport {
    pub issue_key: String,
    pub evaluations: Vec<RuleEvaluation>,
}

impl IssueReport {
    pub fn is_breached(&self) -> bool {
        self.evaluations.iter().any(|e| e.state.breached)
    }
}

/// Snapshots an evaluation runs against. Later store writes never show up
/// in them.
struct Snapshot {
    calendar: Arc<Calendar>,
    rules: Vec<Arc<SlaRule>>,
}

/// Service for managing SLA rules and evaluating them over issue histories
#[derive(Clone)]
pub struct SlaService {
    sla_repo: Arc<dyn SlaRuleRepository>,
    configuration_repo: Arc<dyn ConfigurationRepository>,
    calendar_repo: Arc<dyn CalendarRepository>,
    event_source: Arc<dyn EventSource>,
}

impl SlaService {
    /// Create a new SLA service
    pub fn new(
        sla_repo: Arc<dyn SlaRuleRepository>,
        configuration_repo: Arc<dyn ConfigurationRepository>,
        calendar_repo: Arc<dyn CalendarRepository>,
        event_source: Arc<dyn EventSource>,
    ) -> Self {
        Self {
            sla_repo,
            configuration_repo,
            calendar_repo,
            event_source,
        }
    }

    // ========================================
    // SLA Rule Management
    // ========================================

    /// Validate, normalize and attach a new rule to a subscription
    pub async fn add_sla(&self, subscription_id: &str, draft: SlaRuleDraft) -> DomainResult<SlaRule> {
        let rule = SlaRule::new(draft)?;
        self.sla_repo.create_sla_rule(subscription_id, &rule).await?;

        info!(
            "Created SLA rule {} ({}) for subscription {}",
            rule.name, rule.id, subscription_id
        );
        Ok(rule)
    }

    /// Get one of the subscription's SLA rules by ID
    pub async fn get_sla(&self, subscription_id: &str, rule_id: &str) -> DomainResult<Arc<SlaRule>> {
        self.sla_repo
            .get_sla_rule(subscription_id, rule_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("SLA rule {} not found", rule_id)))
    }

    /// List the rules of a subscription
    pub async fn list_slas(&self, subscription_id: &str) -> DomainResult<Vec<Arc<SlaRule>>> {
        self.sla_repo.list_sla_rules(subscription_id).await
    }

    /// Replace the editable fields of a rule
    pub async fn update_sla(
        &self,
        subscription_id: &str,
        rule_id: &str,
        draft: SlaRuleDraft,
    ) -> DomainResult<SlaRule> {
        let mut rule = (*self.get_sla(subscription_id, rule_id).await?).clone();
        rule.apply(draft)?;
        self.sla_repo.update_sla_rule(subscription_id, &rule).await?;

        info!("Updated SLA rule: {} ({})", rule.name, rule.id);
        Ok(rule)
    }

    /// Delete one of the subscription's SLA rules
    pub async fn delete_sla(&self, subscription_id: &str, rule_id: &str) -> DomainResult<()> {
        self.sla_repo.delete_sla_rule(subscription_id, rule_id).await?;
        info!(
            "Deleted SLA rule {} of subscription {}",
            rule_id, subscription_id
        );
        Ok(())
    }

    // ========================================
    // SLA Evaluation
    // ========================================

    /// Evaluate every rule of a subscription over one issue
    pub async fn evaluate_issue(
        &self,
        subscription_id: &str,
        issue: &TrackedIssue,
        now: NaiveDateTime,
    ) -> DomainResult<IssueReport> {
        let snapshot = self.snapshot(subscription_id).await?;
        Ok(Self::report(&snapshot, issue, now))
    }

    /// Fetch one issue from the event source and evaluate it
    pub async fn evaluate_issue_by_key(
        &self,
        subscription_id: &str,
        issue_key: &str,
        now: NaiveDateTime,
    ) -> DomainResult<IssueReport> {
        let mut issue = self
            .event_source
            .fetch_issue(subscription_id, issue_key)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Issue {} not found", issue_key)))?;
        issue.sort_events();
        self.evaluate_issue(subscription_id, &issue, now).await
    }

    /// Fetch every issue of a subscription and evaluate all its rules.
    ///
    /// Issues are independent, so each one is evaluated on the blocking pool
    /// against the shared snapshot. Reports keep the event source's order.
    pub async fn evaluate_subscription(
        &self,
        subscription_id: &str,
        now: NaiveDateTime,
    ) -> DomainResult<Vec<IssueReport>> {
        let snapshot = Arc::new(self.snapshot(subscription_id).await?);
        let issues = self.event_source.fetch_issues(subscription_id).await?;

        let tasks = issues.into_iter().map(|mut issue| {
            let snapshot = Arc::clone(&snapshot);
            tokio::task::spawn_blocking(move || {
                issue.sort_events();
                Self::report(&snapshot, &issue, now)
            })
        });
        let reports = join_all(tasks)
            .await
            .into_iter()
            .map(|joined| {
                joined.map_err(|e| DomainError::Internal(format!("Evaluation task failed: {}", e)))
            })
            .collect::<DomainResult<Vec<IssueReport>>>()?;

        info!(
            "Evaluated {} issue(s) of subscription {}: {} breached",
            reports.len(),
            subscription_id,
            reports.iter().filter(|r| r.is_breached()).count()
        );
        Ok(reports)
    }

    /// Evaluate several subscriptions concurrently. Subscriptions share no
    /// mutable state, so one failing does not affect the others.
    pub async fn evaluate_subscriptions(
        &self,
        subscription_ids: &[String],
        now: NaiveDateTime,
    ) -> Vec<(String, DomainResult<Vec<IssueReport>>)> {
        let results = join_all(
            subscription_ids
                .iter()
                .map(|id| self.evaluate_subscription(id, now)),
        )
        .await;
        subscription_ids.iter().cloned().zip(results).collect()
    }

    // ========================================
    // Helper Methods
    // ========================================

    async fn snapshot(&self, subscription_id: &str) -> DomainResult<Snapshot> {
        let configuration = self
            .configuration_repo
            .get_configuration(subscription_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "Configuration of subscription {} not found",
                    subscription_id
                ))
            })?;
        let calendar = self
            .calendar_repo
            .get_calendar(&configuration.calendar_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("Calendar {} not found", configuration.calendar_id))
            })?;
        let rules = self.sla_repo.list_sla_rules(subscription_id).await?;
        Ok(Snapshot { calendar, rules })
    }

    fn report(snapshot: &Snapshot, issue: &TrackedIssue, now: NaiveDateTime) -> IssueReport {
        let evaluations = snapshot
            .rules
            .iter()
            .map(|rule| {
                let state = sla_evaluator::evaluate_issue(&snapshot.calendar, rule, issue, now);
                metrics::counter!(SLA_EVALUATIONS_TOTAL).increment(1);
                if state.breached {
                    metrics::counter!(SLA_BREACHES_TOTAL).increment(1);
                }
                debug!(
                    issue = %issue.key,
                    rule = %rule.name,
                    status = %state.status,
                    elapsed_ms = state.elapsed_business_ms,
                    breached = state.breached,
                    "Evaluated SLA rule"
                );
                RuleEvaluation {
                    rule_id: rule.id.clone(),
                    rule_name: rule.name.clone(),
                    state,
                }
            })
            .collect();

        IssueReport {
            issue_key: issue.key.clone(),
            evaluations,
        }
    }
}
