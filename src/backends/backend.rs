//! Backend abstraction.
//!
//! # Responsibilities
//! - Represent a single backend service port (namespace, name, port)
//! - Keep a reverse index of the routing rules that point to it
//!
//! # Design Decisions
//! - The reverse index is for reporting only; hosts never borrow from it
//! - Registering the same link twice is a no-op

use serde::Serialize;
use std::fmt;

use crate::hosts::PathLink;

/// Identity of a backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BackendId {
    pub namespace: String,
    pub name: String,
    pub port: String,
}

impl BackendId {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            port: port.into(),
        }
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.namespace, self.name, self.port)
    }
}

/// A single backend.
#[derive(Debug, Clone, Serialize)]
pub struct Backend {
    /// Rendered identifier, `namespace_name_port`.
    pub id: String,
    pub namespace: String,
    pub name: String,
    pub port: String,
    /// Links of the routing rules bound to this backend.
    paths: Vec<PathLink>,
}

impl Backend {
    /// Create a backend without any bound path.
    pub fn new(id: &BackendId) -> Self {
        Self {
            id: id.to_string(),
            namespace: id.namespace.clone(),
            name: id.name.clone(),
            port: id.port.clone(),
            paths: Vec::new(),
        }
    }

    /// Record that the rule identified by `link` routes to this backend.
    ///
    /// Returns false if the link was already registered.
    pub fn add_backend_path(&mut self, link: PathLink) -> bool {
        if self.paths.contains(&link) {
            return false;
        }
        self.paths.push(link);
        true
    }

    /// Links in registration order.
    pub fn paths(&self) -> &[PathLink] {
        &self.paths
    }

    /// Links sorted by hostname, then by path in the requested direction.
    pub fn sorted_paths(&self, reverse_path: bool) -> Vec<&PathLink> {
        let mut paths: Vec<&PathLink> = self.paths.iter().collect();
        paths.sort_by(|a, b| a.cmp_with(b, reverse_path));
        paths
    }

    /// True when at least one routing rule points here.
    pub fn has_paths(&self) -> bool {
        !self.paths.is_empty()
    }
}
