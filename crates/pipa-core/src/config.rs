// ── Runtime connection configuration ──
//
// Describes *how* to reach one codec. Carries the community secret and
// transport tuning, but never touches disk. The CLI builds a
// `ConnectionConfig` (usually via pipa-config) and hands it in.

use std::time::Duration;

use pipa_api::transport::DEFAULT_MAX_REPETITIONS;
use pipa_api::{SnmpVersion, TransportConfig};
use secrecy::SecretString;

use crate::error::CoreError;

/// SNMP protocol version used when none is given (v2c).
pub const DEFAULT_VERSION: u8 = 2;
/// Extra attempts after a timeout. The agent is asked once by default.
pub const DEFAULT_RETRIES: u32 = 0;
/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Connection parameters for a single codec.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Hostname or address, optionally with `:port` (defaults to 161).
    pub host: String,
    /// SNMP community string.
    pub community: SecretString,
    /// Protocol version: 1 or 2 (v2c). Defaults to [`DEFAULT_VERSION`].
    pub version: u8,
    /// Retries per request after a timeout. Defaults to [`DEFAULT_RETRIES`].
    pub retries: u32,
    /// Per-request timeout. Defaults to [`DEFAULT_TIMEOUT_SECS`].
    pub timeout: Duration,
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>, community: SecretString) -> Self {
        Self {
            host: host.into(),
            community,
            version: DEFAULT_VERSION,
            retries: DEFAULT_RETRIES,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the parameters and translate them for the transport layer.
    pub fn to_transport(&self) -> Result<TransportConfig, CoreError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(CoreError::InvalidConfig {
                field: "host",
                reason: "host must not be empty".into(),
            });
        }

        let version = SnmpVersion::try_from(self.version).map_err(|e| {
            CoreError::InvalidConfig {
                field: "version",
                reason: e.to_string(),
            }
        })?;

        if self.timeout.is_zero() {
            return Err(CoreError::InvalidConfig {
                field: "timeout",
                reason: "timeout must be greater than zero".into(),
            });
        }

        Ok(TransportConfig {
            target: host.to_owned(),
            community: self.community.clone(),
            version,
            retries: self.retries,
            timeout: self.timeout,
            max_repetitions: DEFAULT_MAX_REPETITIONS,
        })
    }
}
