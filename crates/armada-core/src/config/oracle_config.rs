//! Planning-oracle connection configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where the oracle listens and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OracleConfig {
    /// `tcp://host:port`, `unix://path`, `host:port`, or a socket path.
    /// Default: `./socket_file`.
    pub address: Option<String>,
    /// Connect timeout in milliseconds. Default: 5000.
    pub connect_timeout_ms: Option<u64>,
    /// Deadline for a whole request/response exchange. Default: 600000.
    pub request_timeout_ms: Option<u64>,
    /// How often a blocked read checks for cancellation. Default: 200.
    pub poll_interval_ms: Option<u64>,
}

impl OracleConfig {
    pub fn effective_address(&self) -> String {
        self.address
            .clone()
            .unwrap_or_else(|| "./socket_file".to_string())
    }

    pub fn effective_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms.unwrap_or(5_000))
    }

    pub fn effective_request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.unwrap_or(600_000))
    }

    pub fn effective_poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.unwrap_or(200))
    }
}
