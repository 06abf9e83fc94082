pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use config::*;
pub use domain::errors::*;
pub use infrastructure::persistence::MemoryStore;
pub use services::*;
