use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("env file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read env file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
