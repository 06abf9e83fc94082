use serde::{Deserialize, Serialize};

/// SLA configuration of one subscription: which calendar it measures against
/// and which rules it owns. Associations are plain identifiers resolved
/// through the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfiguration {
    pub id: String,
    pub subscription_id: String,
    pub calendar_id: String,
    pub sla_rule_ids: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TrackerConfiguration {
    pub fn new(subscription_id: String, calendar_id: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            subscription_id,
            calendar_id,
            sla_rule_ids: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
