pub mod calendar_repository;
pub mod configuration_repository;
pub mod event_source;
pub mod sla_rule_repository;
