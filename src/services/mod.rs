pub mod calendar_service;
pub mod sla_service;
pub mod subscription_service;

pub use calendar_service::*;
pub use sla_service::*;
pub use subscription_service::*;
