//! Virtual hosts and their routing rules.
//!
//! # Responsibilities
//! - Hold the routing rules of one hostname, most specific path first
//! - Snapshot backends at bind time
//! - Keep the registry's passthrough counter in step with the host flag
//!
//! # Design Decisions
//! - Paths are re-sorted after every insertion (path counts per host are small)
//! - Equality is structural over the whole host; the registry handle is ignored

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Weak;

use crate::backends::Backend;
use crate::hosts::link::PathLink;

/// Backend id bound to paths that have no backend.
pub const ERROR_404_BACKEND: &str = "_error404";

/// Aggregates a registry keeps about its current hosts.
///
/// Hosts only ever hold a [`Weak`] reference to it.
#[derive(Debug, Default)]
pub(crate) struct Aggregates {
    pub(crate) ssl_passthrough: AtomicUsize,
}

/// How a request path is compared against a rule path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    #[default]
    Begin,
    Exact,
    Prefix,
    Regex,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchType::Begin => "begin",
            MatchType::Exact => "exact",
            MatchType::Prefix => "prefix",
            MatchType::Regex => "regex",
        };
        f.write_str(s)
    }
}

/// Value snapshot of a backend taken when a path is bound to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostBackend {
    pub id: String,
    pub namespace: String,
    pub name: String,
    pub port: String,
}

impl HostBackend {
    /// Sentinel used when a path has no backend.
    pub fn error404() -> Self {
        Self {
            id: ERROR_404_BACKEND.to_string(),
            ..Default::default()
        }
    }

    pub fn is_error404(&self) -> bool {
        self.id == ERROR_404_BACKEND
    }
}

impl From<&Backend> for HostBackend {
    fn from(backend: &Backend) -> Self {
        Self {
            id: backend.id.clone(),
            namespace: backend.namespace.clone(),
            name: backend.name.clone(),
            port: backend.port.clone(),
        }
    }
}

/// One routing rule of a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostPath {
    pub path: String,
    pub link: PathLink,
    #[serde(rename = "match")]
    pub match_type: MatchType,
    pub backend: HostBackend,
}

/// TLS settings of a host. Certificate material lives elsewhere; only file
/// names and content hashes are tracked here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostTlsConfig {
    pub alpn: String,
    pub ca_error_page: String,
    pub ca_filename: String,
    pub ca_hash: String,
    pub ca_verify_optional: bool,
    pub ciphers: String,
    pub crl_filename: String,
    pub crl_hash: String,
    pub options: String,
    pub tls_common_name: String,
    pub tls_filename: String,
    pub tls_hash: String,
    pub use_default_crt: bool,
}

impl HostTlsConfig {
    /// True when a certificate is configured.
    pub fn has_tls(&self) -> bool {
        !self.tls_filename.is_empty()
    }
}

/// Alternative names served by a host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostAlias {
    pub alias_name: String,
    pub alias_regex: String,
}

/// A virtual host.
#[derive(Debug, Serialize)]
pub struct Host {
    hostname: String,
    paths: Vec<HostPath>,
    pub tls: HostTlsConfig,
    pub alias: HostAlias,
    pub root_redirect: String,
    pub var_namespace: bool,
    ssl_passthrough: bool,
    #[serde(skip)]
    registry: Weak<Aggregates>,
}

impl Host {
    pub(crate) fn new(hostname: impl Into<String>, registry: Weak<Aggregates>) -> Self {
        Self {
            hostname: hostname.into(),
            paths: Vec::new(),
            tls: HostTlsConfig::default(),
            alias: HostAlias::default(),
            root_redirect: String::new(),
            var_namespace: false,
            ssl_passthrough: false,
            registry,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Routing rules, sorted by descending path.
    pub fn paths(&self) -> &[HostPath] {
        &self.paths
    }

    /// First rule whose path is exactly `path`.
    pub fn find_path(&self, path: &str) -> Option<&HostPath> {
        self.paths.iter().find(|p| p.path == path)
    }

    /// Add a routing rule.
    ///
    /// The backend, if any, is snapshotted and learns the new link. Without a
    /// backend the rule points to the 404 sentinel. Duplicated paths are not
    /// filtered.
    pub fn add_path(&mut self, backend: Option<&mut Backend>, path: &str, match_type: MatchType) {
        let link = PathLink::new(self.hostname.as_str(), path);
        let host_backend = match backend {
            Some(backend) => {
                backend.add_backend_path(link.clone());
                HostBackend::from(&*backend)
            }
            None => HostBackend::error404(),
        };
        self.paths.push(HostPath {
            path: path.to_string(),
            link,
            match_type,
            backend: host_backend,
        });
        // reverse order so that sub-paths don't shadow longer paths
        self.paths.sort_by(|a, b| b.path.cmp(&a.path));
    }

    /// True when client certificates are verified against a CA.
    pub fn has_tls_auth(&self) -> bool {
        !self.tls.ca_hash.is_empty()
    }

    pub fn ssl_passthrough(&self) -> bool {
        self.ssl_passthrough
    }

    /// Change the passthrough flag, updating the registry counter.
    pub fn set_ssl_passthrough(&mut self, value: bool) {
        if self.ssl_passthrough == value {
            return;
        }
        if let Some(aggregates) = self.registry.upgrade() {
            if value {
                aggregates.ssl_passthrough.fetch_add(1, Ordering::Relaxed);
            } else {
                aggregates.ssl_passthrough.fetch_sub(1, Ordering::Relaxed);
            }
        }
        self.ssl_passthrough = value;
    }
}

impl PartialEq for Host {
    fn eq(&self, other: &Self) -> bool {
        self.hostname == other.hostname
            && self.paths == other.paths
            && self.tls == other.tls
            && self.alias == other.alias
            && self.root_redirect == other.root_redirect
            && self.var_namespace == other.var_namespace
            && self.ssl_passthrough == other.ssl_passthrough
    }
}

impl Eq for Host {}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.hostname)?;
        for (i, p) in self.paths.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}({}) -> {}", p.path, p.match_type, p.backend.id)?;
        }
        write!(
            f,
            "] tls={} ssl_passthrough={} var_namespace={}",
            self.tls.has_tls(),
            self.ssl_passthrough,
            self.var_namespace
        )
    }
}
