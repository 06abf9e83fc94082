use crate::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

pub const SLA_EVALUATIONS_TOTAL: &str = "sla_evaluations_total";
pub const SLA_BREACHES_TOTAL: &str = "sla_breaches_total";
pub const CALENDAR_RANGE_REJECTIONS_TOTAL: &str = "calendar_range_rejections_total";

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, else from
/// [`Config::log_filter`]. Returns `false` when a subscriber was already
/// installed by the embedding application.
pub fn init(config: &Config) -> bool {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log_filter.as_str().into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(true)
        .with_target(true);

    let installed = Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok();

    if installed {
        describe_metrics();
        tracing::info!(service = %config.service_name, "Tracing initialized");
    }
    installed
}

fn describe_metrics() {
    metrics::describe_counter!(
        SLA_EVALUATIONS_TOTAL,
        "SLA rule evaluations performed over an issue history"
    );
    metrics::describe_counter!(SLA_BREACHES_TOTAL, "SLA evaluations that ended breached");
    metrics::describe_counter!(
        CALENDAR_RANGE_REJECTIONS_TOTAL,
        "Business hours writes refused by validation"
    );
}
