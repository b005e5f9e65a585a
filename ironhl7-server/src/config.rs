/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Server configuration.
//!
//! This module provides the listen address, request limits and the build
//! metadata reported by the `/version` endpoint.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Default listen host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default maximum request body size (1 MiB).
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 1024 * 1024;

/// Default time a connection may take to deliver a complete request head,
/// including the idle wait between kept-alive requests.
pub const DEFAULT_HEADER_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding the listen host.
pub const HOST_ENV: &str = "HL7_HOST";

/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "HL7_PORT";

/// Version and build date of the running binary.
///
/// Created once at startup and handed to whatever reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Crate version.
    version: String,
    /// Build date, or `"unknown"`.
    #[serde(rename = "buildDate")]
    build_date: String,
}

impl BuildInfo {
    /// Creates build metadata from explicit values.
    #[must_use]
    pub fn new(version: impl Into<String>, build_date: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            build_date: build_date.into(),
        }
    }

    /// Reads the crate version and the `HL7_BUILD_DATE` value captured at
    /// compile time.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(
            env!("CARGO_PKG_VERSION"),
            option_env!("HL7_BUILD_DATE").unwrap_or("unknown"),
        )
    }

    /// Returns the version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the build date string.
    #[must_use]
    pub fn build_date(&self) -> &str {
        &self.build_date
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::new("dev", "unknown")
    }
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Maximum request body size in bytes.
    pub max_request_size: usize,
    /// Deadline for reading a request head on an open connection.
    pub header_read_timeout: Duration,
    /// Metadata reported by `/version`.
    pub build_info: BuildInfo,
}

impl ServerConfig {
    /// Creates a configuration listening on `host:port`.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
            header_read_timeout: DEFAULT_HEADER_READ_TIMEOUT,
            build_info: BuildInfo::default(),
        }
    }

    /// Loads host and port from `HL7_HOST` and `HL7_PORT`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads host and port through `lookup`.
    ///
    /// A port that does not parse falls back to [`DEFAULT_PORT`].
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV)
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup(PORT_ENV).filter(|p| !p.is_empty()) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, default = DEFAULT_PORT, "invalid HL7_PORT, using default");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self::new(host, port)
    }

    /// Sets the listen host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the listen port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the maximum request size.
    #[must_use]
    pub const fn with_max_request_size(mut self, size: usize) -> Self {
        self.max_request_size = size;
        self
    }

    /// Sets the request head read deadline.
    #[must_use]
    pub const fn with_header_read_timeout(mut self, timeout: Duration) -> Self {
        self.header_read_timeout = timeout;
        self
    }

    /// Sets the build metadata.
    #[must_use]
    pub fn with_build_info(mut self, info: BuildInfo) -> Self {
        self.build_info = info;
        self
    }

    /// Returns the socket address string.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}
