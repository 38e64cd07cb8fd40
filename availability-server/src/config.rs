//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::availability::AvailabilityConfig;
use crate::stations::StationClientConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub availability: AvailabilityConfig,
    pub stations: StationClientConfig,

    /// Serve saved responses from this directory instead of the live service
    pub mock_data_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Read `BIND_ADDR`, `AVAILABILITY_BASE_URL`, `STATION_BASE_URL`,
    /// `HTTP_TIMEOUT_SECS` and `MOCK_DATA_DIR`. Unset variables keep their
    /// defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| get(var).filter(|v| !v.trim().is_empty());

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                var: "BIND_ADDR",
                value: bind_addr.clone(),
            })?;

        let mut availability = AvailabilityConfig::new();
        let mut stations = StationClientConfig::new();

        if let Some(url) = get("AVAILABILITY_BASE_URL") {
            availability = availability.with_base_url(url);
        }
        if let Some(url) = get("STATION_BASE_URL") {
            stations = stations.with_base_url(url);
        }
        if let Some(raw) = get("HTTP_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&s| s > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: "HTTP_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
            availability = availability.with_timeout(secs);
            stations = stations.with_timeout(secs);
        }

        Ok(Self {
            bind_addr,
            availability,
            stations,
            mock_data_dir: get("MOCK_DATA_DIR").map(PathBuf::from),
        })
    }
}
