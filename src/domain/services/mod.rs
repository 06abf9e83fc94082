pub mod business_hours_validator;
pub mod business_time;
pub mod sla_evaluator;

pub use business_time::business_millis_between;
pub use sla_evaluator::{evaluate, evaluate_issue};
