//! dnr-relay configuration
//!
//! Every setting resolves CLI > environment > TOML file > compiled default,
//! except the email provider API key, which has no default: a relay without
//! it cannot deliver anything and refuses to start.

use crate::relay::RelaySettings;
use crate::transport::RESEND_API_URL;
use dnr_common::config::ConfigLayers;
use dnr_common::{Error, Result};
use std::net::{IpAddr, SocketAddr};

pub const ENV_API_KEY: &str = "RESEND_API_KEY";
pub const ENV_PORT: &str = "DNR_RELAY_PORT";
pub const ENV_BIND: &str = "DNR_RELAY_BIND";
pub const ENV_FROM_ADDRESS: &str = "DNR_FROM_ADDRESS";
pub const ENV_BUSINESS_ADDRESS: &str = "DNR_BUSINESS_ADDRESS";
pub const ENV_RESEND_BASE_URL: &str = "DNR_RESEND_BASE_URL";

pub const DEFAULT_PORT: u16 = 8787;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_FROM_ADDRESS: &str = "DNR Transmissions <onboarding@resend.dev>";
pub const DEFAULT_BUSINESS_ADDRESS: &str = "dini@dnrtransmissions.co.za";

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub port: Option<u16>,
    pub bind: Option<String>,
    pub from_address: Option<String>,
    pub business_address: Option<String>,
    pub resend_base_url: Option<String>,
}

/// Resolved relay configuration
#[derive(Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub api_key: String,
    pub bind: IpAddr,
    pub port: u16,
    pub from_address: String,
    pub business_address: String,
    pub resend_base_url: String,
}

impl RelayConfig {
    /// Resolve all settings from the command line and the lower layers
    pub fn resolve(cli: &ConfigOverrides, layers: &ConfigLayers) -> Result<Self> {
        let api_key = layers
            .resolve(cli.api_key.as_deref(), ENV_API_KEY, "resend_api_key")
            .ok_or_else(|| {
                Error::Config(format!(
                    "Email provider API key missing: set {} or resend_api_key in the config file",
                    ENV_API_KEY
                ))
            })?;

        let port_cli = cli.port.map(|p| p.to_string());
        let port = match layers.resolve(port_cli.as_deref(), ENV_PORT, "port") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("Invalid port '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        let bind_raw = layers.resolve_or(cli.bind.as_deref(), ENV_BIND, "bind", DEFAULT_BIND);
        let bind = bind_raw
            .parse::<IpAddr>()
            .map_err(|_| Error::Config(format!("Invalid bind address '{}'", bind_raw)))?;

        Ok(Self {
            api_key,
            bind,
            port,
            from_address: layers.resolve_or(
                cli.from_address.as_deref(),
                ENV_FROM_ADDRESS,
                "from_address",
                DEFAULT_FROM_ADDRESS,
            ),
            business_address: layers.resolve_or(
                cli.business_address.as_deref(),
                ENV_BUSINESS_ADDRESS,
                "business_address",
                DEFAULT_BUSINESS_ADDRESS,
            ),
            resend_base_url: layers.resolve_or(
                cli.resend_base_url.as_deref(),
                ENV_RESEND_BASE_URL,
                "resend_base_url",
                RESEND_API_URL,
            ),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Addresses handed to the relay
    pub fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            from_address: self.from_address.clone(),
            business_address: self.business_address.clone(),
        }
    }
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &"<redacted>")
            .field("bind", &self.bind)
            .field("port", &self.port)
            .field("from_address", &self.from_address)
            .field("business_address", &self.business_address)
            .field("resend_base_url", &self.resend_base_url)
            .finish()
    }
}
