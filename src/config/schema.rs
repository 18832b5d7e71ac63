//! Configuration schema definitions.
//!
//! This module defines the desired-state snapshot read by the sync driver.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::hosts::{HostAlias, HostTlsConfig, MatchType};

/// Root configuration: observability settings plus the desired hosts.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Virtual hosts and their routing rules.
    pub hosts: Vec<HostConfig>,
}

/// One virtual host.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct HostConfig {
    /// Hostname, or `<default>` for the catch-all host.
    pub hostname: String,

    /// Defer TLS termination to the backend.
    #[serde(default)]
    pub ssl_passthrough: bool,

    /// Expose the namespace of the matched backend as a proxy variable.
    #[serde(default)]
    pub var_namespace: bool,

    /// Redirect target for requests to `/`.
    #[serde(default)]
    pub root_redirect: String,

    /// Alternative names served by this host.
    #[serde(default)]
    pub alias: Option<HostAlias>,

    /// TLS settings.
    #[serde(default)]
    pub tls: Option<HostTlsConfig>,

    /// Routing rules.
    #[serde(default)]
    pub paths: Vec<PathConfig>,
}

/// One routing rule.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PathConfig {
    /// Request path.
    pub path: String,

    /// Path comparison (begin, exact, prefix, regex).
    #[serde(default, rename = "match")]
    pub match_type: MatchType,

    /// Target service; requests get a 404 when missing.
    #[serde(default)]
    pub backend: Option<BackendRef>,
}

/// Reference to a backend service port.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BackendRef {
    /// Namespace of the service.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Service name.
    pub name: String,

    /// Service port, numeric or named.
    pub port: String,
}

fn default_namespace() -> String {
    "default".to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
