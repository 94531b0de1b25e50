//! Errors raised while loading or checking `inkdex.toml`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid inkdex.toml")]
    Toml(#[from] toml::de::Error),

    /// A value parsed fine but is unusable; the message names the key.
    #[error("invalid config: {0}")]
    Validation(String),
}
