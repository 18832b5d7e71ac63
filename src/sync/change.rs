//! Delta reported by a sync cycle.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::hosts::Hosts;

/// How the proxy must be reloaded to apply a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReloadKind {
    /// Nothing changed.
    Skip,
    /// Only host-local state changed; hosts can be patched in place.
    Dynamic,
    /// First build, or a global aggregate flipped.
    Full,
}

impl ReloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReloadKind::Skip => "skip",
            ReloadKind::Dynamic => "dynamic",
            ReloadKind::Full => "full",
        }
    }
}

impl fmt::Display for ReloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hostnames changed since the last commit, each list sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    /// New hostnames.
    pub added: Vec<String>,
    /// Hostnames that disappeared.
    pub removed: Vec<String>,
    /// Hostnames whose content changed.
    pub updated: Vec<String>,
    pub reload: ReloadKind,
}

impl ChangeSet {
    /// Read the delta views of a registry. Call after `shrink`.
    pub fn from_hosts(hosts: &Hosts, reload: ReloadKind) -> Self {
        let added_names: HashSet<&str> = hosts.items_add().map(|(hostname, _)| hostname).collect();
        let removed_names: HashSet<&str> = hosts.items_del().map(|(hostname, _)| hostname).collect();

        let (mut updated, mut added): (Vec<String>, Vec<String>) = added_names
            .iter()
            .map(|hostname| hostname.to_string())
            .partition(|hostname| removed_names.contains(hostname.as_str()));
        let mut removed: Vec<String> = removed_names
            .difference(&added_names)
            .map(|hostname| hostname.to_string())
            .collect();

        added.sort();
        removed.sort();
        updated.sort();
        Self {
            added,
            removed,
            updated,
            reload,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}
