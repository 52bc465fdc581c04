//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `DIVER_SERVICE_*` environment variables or a
//! configuration file. Every field is optional at load time; accessors apply
//! defaults and [`ServiceSettings::database_url`] and
//! [`ServiceSettings::directory_url`] report missing required values.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 25;
const DEFAULT_DB_MIN_IDLE: u32 = 5;
const DEFAULT_DB_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DIRECTORY_TIMEOUT_MS: u64 = 2_000;

/// Configuration problems detected after loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A required value was not supplied.
    #[error("{field} must be configured")]
    Missing {
        /// Setting name.
        field: &'static str,
    },
    /// A value was supplied but could not be used.
    #[error("{field} is invalid: {reason}")]
    Invalid {
        /// Setting name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Configuration values for the diver service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIVER_SERVICE")]
pub struct ServiceSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Idle database connections kept open.
    pub db_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connection_timeout_secs: Option<u64>,
    /// Base URL of the user directory.
    pub directory_url: Option<String>,
    /// Directory lookup timeout in milliseconds.
    pub directory_timeout_ms: Option<u64>,
}

impl ServiceSettings {
    /// Bind address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::Invalid {
            field: "bind_addr",
            reason: err.to_string(),
        })
    }

    /// Database URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::Missing {
                field: "database_url",
            })
    }

    /// Maximum pooled connections.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Idle connections kept open.
    pub fn db_min_idle(&self) -> u32 {
        self.db_min_idle.unwrap_or(DEFAULT_DB_MIN_IDLE)
    }

    /// Pool checkout timeout.
    pub fn db_connection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.db_connection_timeout_secs
                .unwrap_or(DEFAULT_DB_CONNECTION_TIMEOUT_SECS),
        )
    }

    /// Directory base URL; must be absolute `http` or `https`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when unset and
    /// [`SettingsError::Invalid`] when unparsable or not http(s).
    pub fn directory_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .directory_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::Missing {
                field: "directory_url",
            })?;
        let url = Url::parse(raw).map_err(|err| SettingsError::Invalid {
            field: "directory_url",
            reason: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SettingsError::Invalid {
                field: "directory_url",
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }
        Ok(url)
    }

    /// Directory lookup timeout, defaulting to two seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] for a zero timeout.
    pub fn directory_timeout(&self) -> Result<Duration, SettingsError> {
        match self.directory_timeout_ms {
            Some(0) => Err(SettingsError::Invalid {
                field: "directory_timeout_ms",
                reason: "must be greater than zero".to_owned(),
            }),
            millis => Ok(Duration::from_millis(
                millis.unwrap_or(DEFAULT_DIRECTORY_TIMEOUT_MS),
            )),
        }
    }
}
