#![allow(unused_imports)]
pub mod sla_helpers;
pub mod test_store;

pub use sla_helpers::*;
pub use test_store::*;
