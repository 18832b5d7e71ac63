//! Host registry with per-cycle change tracking.
//!
//! # Responsibilities
//! - Own every current host, keyed by hostname
//! - Track hosts created and removed since the last commit
//! - Cancel add/remove pairs that rebuilt an identical host
//! - Keep registry-wide aggregates without rescanning hosts
//!
//! # Design Decisions
//! - Added hosts live in `items`; the added view only stores their names
//! - Removed hosts are moved out of `items` and kept until commit
//! - A host created and removed within the same cycle leaves no trace
//! - Not synchronized: one cycle driver per registry

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::hosts::host::{Aggregates, Host};

/// Hostname of the catch-all host.
pub const DEFAULT_HOST: &str = "<default>";

/// The registry of virtual hosts.
#[derive(Debug)]
pub struct Hosts {
    items: HashMap<String, Host>,
    items_add: HashSet<String>,
    items_del: HashMap<String, Host>,
    aggregates: Arc<Aggregates>,
    has_commit: bool,
}

impl Hosts {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            items_add: HashSet::new(),
            items_del: HashMap::new(),
            aggregates: Arc::new(Aggregates::default()),
            has_commit: false,
        }
    }

    /// Return the host for `hostname`, creating it if needed.
    pub fn acquire(&mut self, hostname: &str) -> &mut Host {
        match self.items.entry(hostname.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::debug!(hostname, "Host created");
                self.items_add.insert(hostname.to_string());
                entry.insert(Host::new(hostname, Arc::downgrade(&self.aggregates)))
            }
        }
    }

    pub fn find(&self, hostname: &str) -> Option<&Host> {
        self.items.get(hostname)
    }

    /// Remove the named hosts. Unknown hostnames are ignored.
    pub fn remove_all<I, S>(&mut self, hostnames: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for hostname in hostnames {
            let hostname = hostname.as_ref();
            let Some(host) = self.items.remove(hostname) else {
                continue;
            };
            self.release_host(&host);
            if self.items_add.remove(hostname) {
                tracing::debug!(hostname, "Host created and removed in the same cycle");
                continue;
            }
            tracing::debug!(hostname, "Host removed");
            self.items_del.insert(hostname.to_string(), host);
        }
    }

    /// Cancel add/remove pairs whose hosts have the same content.
    ///
    /// A matching pair means the hostname was reparsed without change. The
    /// removed instance goes back to `items` and the hostname leaves both
    /// views.
    pub fn shrink(&mut self) {
        let reparsed: Vec<String> = self
            .items_add
            .iter()
            .filter(|hostname| self.items_del.contains_key(*hostname))
            .cloned()
            .collect();

        let mut cancelled = 0usize;
        for hostname in reparsed {
            let unchanged = match (self.items.get(&hostname), self.items_del.get(&hostname)) {
                (Some(add), Some(del)) => add == del,
                _ => false,
            };
            if !unchanged {
                continue;
            }
            // Equal content means equal passthrough flag, so the counter
            // contribution of the added host carries over to the restored one.
            if let Some(del) = self.items_del.remove(&hostname) {
                self.items.insert(hostname.clone(), del);
            }
            self.items_add.remove(&hostname);
            cancelled += 1;
        }

        if cancelled > 0 {
            tracing::debug!(
                cancelled,
                added = self.items_add.len(),
                removed = self.items_del.len(),
                "Unchanged hosts dropped from the delta"
            );
        }
    }

    /// Close the cycle.
    pub fn commit(&mut self) {
        self.items_add.clear();
        self.items_del.clear();
        self.has_commit = true;
    }

    /// True once [`Hosts::commit`] has been called at least once.
    pub fn has_commit(&self) -> bool {
        self.has_commit
    }

    /// True when hosts were added or removed since the last commit.
    ///
    /// Only meaningful after [`Hosts::shrink`].
    pub fn changed(&self) -> bool {
        !self.items_add.is_empty() || !self.items_del.is_empty()
    }

    /// Every host but the default one, sorted by hostname.
    ///
    /// Returns `None` when there is no such host.
    pub fn build_sorted_items(&self) -> Option<Vec<&Host>> {
        let mut items: Vec<&Host> = self
            .items
            .iter()
            .filter(|(hostname, _)| hostname.as_str() != DEFAULT_HOST)
            .map(|(_, host)| host)
            .collect();
        if items.is_empty() {
            return None;
        }
        items.sort_by(|a, b| a.hostname().cmp(b.hostname()));
        Some(items)
    }

    pub fn default_host(&self) -> Option<&Host> {
        self.items.get(DEFAULT_HOST)
    }

    /// Current hosts, in no particular order.
    pub fn items(&self) -> impl Iterator<Item = (&str, &Host)> {
        self.items.iter().map(|(hostname, host)| (hostname.as_str(), host))
    }

    /// Hosts created since the last commit.
    pub fn items_add(&self) -> impl Iterator<Item = (&str, &Host)> {
        self.items_add
            .iter()
            .filter_map(move |hostname| self.items.get(hostname).map(|host| (hostname.as_str(), host)))
    }

    /// Hosts removed since the last commit, as they were when removed.
    pub fn items_del(&self) -> impl Iterator<Item = (&str, &Host)> {
        self.items_del.iter().map(|(hostname, host)| (hostname.as_str(), host))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when at least one current host uses SSL passthrough.
    pub fn has_ssl_passthrough(&self) -> bool {
        self.ssl_passthrough_count() > 0
    }

    /// Number of current hosts using SSL passthrough.
    pub fn ssl_passthrough_count(&self) -> usize {
        self.aggregates.ssl_passthrough.load(Ordering::Relaxed)
    }

    /// True when any current host needs the namespace variable.
    pub fn has_var_namespace(&self) -> bool {
        self.items.values().any(|host| host.var_namespace)
    }

    // Reverse the contribution of a host leaving `items`.
    fn release_host(&self, host: &Host) {
        if host.ssl_passthrough() {
            self.aggregates.ssl_passthrough.fetch_sub(1, Ordering::Relaxed);
        }
    }
}

impl Default for Hosts {
    fn default() -> Self {
        Self::new()
    }
}
