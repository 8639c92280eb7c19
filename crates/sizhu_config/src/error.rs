//! Configuration errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("I/O error reading {path}: {message}")]
    Io { path: String, message: String },
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}
