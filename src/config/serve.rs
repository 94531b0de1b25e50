//! `[serve]` section: where `inkdex serve` listens and whether it watches.

use super::{defaults, error::ConfigError};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// ```toml
/// [serve]
/// interface = "0.0.0.0"
/// port = 5277        # next free port is tried when taken
/// watch = true       # rebuild the index when posts change
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// IP address to bind; host names are not resolved.
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub watch: bool,
}

impl ServeConfig {
    /// Parsed bind address.
    pub fn ip(&self) -> Result<IpAddr, ConfigError> {
        self.interface.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "[serve.interface] `{}` is not an IP address",
                self.interface
            ))
        })
    }
}
