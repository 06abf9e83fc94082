pub mod calendar;
pub mod configuration;
pub mod holiday;
pub mod issue;
pub mod sla_rule;
pub mod sla_state;
pub mod time_range;

pub use calendar::*;
pub use configuration::*;
pub use holiday::*;
pub use issue::*;
pub use sla_rule::*;
pub use sla_state::*;
pub use time_range::*;
