use crate::domain::entities::{Calendar, SlaRule, TrackerConfiguration};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

mod calendars;
mod configurations;
mod sla;

/// Identifier-keyed arena of every entity the engine reads.
#[derive(Default)]
pub(crate) struct Arena {
    pub(crate) calendars: HashMap<String, Arc<Calendar>>,
    pub(crate) sla_rules: HashMap<String, Arc<SlaRule>>,
    /// Keyed by subscription id.
    pub(crate) configurations: HashMap<String, TrackerConfiguration>,
}

/// In-memory store backing the repository ports.
///
/// Calendars and rules are held as `Arc` snapshots and written copy-on-write,
/// so a snapshot handed to an evaluation never changes underneath it. Every
/// write takes the arena lock, which serializes mutations of the same entity.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub(crate) inner: Arc<RwLock<Arena>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of configurations measuring against the calendar.
    pub async fn calendar_usage(&self, calendar_id: &str) -> usize {
        let arena = self.inner.read().await;
        arena.calendar_usage(calendar_id)
    }
}

impl Arena {
    pub(crate) fn calendar_usage(&self, calendar_id: &str) -> usize {
        self.configurations
            .values()
            .filter(|c| c.calendar_id == calendar_id)
            .count()
    }
}
