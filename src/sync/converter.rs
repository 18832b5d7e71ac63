//! Applies desired-state snapshots to the host registry.
//!
//! # Responsibilities
//! - Reparse every host of a snapshot into the registry
//! - Reconcile the delta and decide the reload kind
//! - Close the cycle once the proxy was reloaded
//!
//! # Design Decisions
//! - Full reparse on every cycle; `shrink` removes the churn
//! - Backends are rebuilt per cycle, only their reverse index matters here

use crate::backends::Backends;
use crate::config::{HostConfig, RegistryConfig};
use crate::hosts::{Host, Hosts};
use crate::sync::change::{ChangeSet, ReloadKind};

/// Registry aggregates that force a full reload when they flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GlobalState {
    ssl_passthrough: bool,
    var_namespace: bool,
}

impl GlobalState {
    fn of(hosts: &Hosts) -> Self {
        Self {
            ssl_passthrough: hosts.has_ssl_passthrough(),
            var_namespace: hosts.has_var_namespace(),
        }
    }
}

/// Drives sync cycles against one registry.
#[derive(Debug, Default)]
pub struct Converter {
    hosts: Hosts,
    backends: Backends,
    committed: Option<GlobalState>,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hosts(&self) -> &Hosts {
        &self.hosts
    }

    /// Backends referenced by the last synced snapshot.
    pub fn backends(&self) -> &Backends {
        &self.backends
    }

    /// Apply a snapshot and report what changed since the last commit.
    ///
    /// Changes stay pending until [`Converter::commit`] is called; calling
    /// `sync` again before that reports the combined delta.
    pub fn sync(&mut self, config: &RegistryConfig) -> ChangeSet {
        let reparse: Vec<String> = self
            .hosts
            .items()
            .map(|(hostname, _)| hostname.to_string())
            .chain(config.hosts.iter().map(|h| h.hostname.clone()))
            .collect();
        self.hosts.remove_all(&reparse);

        self.backends = Backends::new();
        for host_config in &config.hosts {
            let host = self.hosts.acquire(&host_config.hostname);
            apply_host(host, host_config, &mut self.backends);
        }

        self.hosts.shrink();
        let reload = self.reload_kind();
        let changes = ChangeSet::from_hosts(&self.hosts, reload);

        tracing::info!(
            hosts = self.hosts.len(),
            added = changes.added.len(),
            removed = changes.removed.len(),
            updated = changes.updated.len(),
            reload = %reload,
            "Sync cycle finished"
        );
        changes
    }

    /// Close the cycle after the proxy applied the delta.
    pub fn commit(&mut self) {
        self.hosts.commit();
        self.committed = Some(GlobalState::of(&self.hosts));
        tracing::debug!("Sync cycle committed");
    }

    fn reload_kind(&self) -> ReloadKind {
        match self.committed {
            None => ReloadKind::Full,
            Some(_) if !self.hosts.changed() => ReloadKind::Skip,
            Some(state) if state != GlobalState::of(&self.hosts) => ReloadKind::Full,
            Some(_) => ReloadKind::Dynamic,
        }
    }
}

fn apply_host(host: &mut Host, config: &HostConfig, backends: &mut Backends) {
    host.set_ssl_passthrough(config.ssl_passthrough);
    host.var_namespace = config.var_namespace;
    host.root_redirect = config.root_redirect.clone();
    if let Some(alias) = &config.alias {
        host.alias = alias.clone();
    }
    if let Some(tls) = &config.tls {
        host.tls = tls.clone();
    }
    for path in &config.paths {
        let backend = match &path.backend {
            Some(b) => Some(backends.acquire(&b.namespace, &b.name, &b.port)),
            None => None,
        };
        host.add_path(backend, &path.path, path.match_type);
    }
}
