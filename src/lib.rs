pub mod config;
pub mod context;

pub use config::{ConfigError, ConfigStore, EnvLoader};
pub use context::AppContext;
