//! Configuration store and env-file loading.

mod error;
mod loader;
mod store;

pub use error::ConfigError;
pub use loader::{EnvLoader, DEFAULT_ENV_FILE};
pub use store::ConfigStore;
