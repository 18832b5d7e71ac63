//! Backend pool management.
//!
//! # Responsibilities
//! - Own every backend referenced during one sync cycle
//! - Hand out backends by (namespace, name, port), creating them on demand

use std::collections::HashMap;

use crate::backends::backend::{Backend, BackendId};

/// Collection of backends keyed by their identity.
#[derive(Debug, Default)]
pub struct Backends {
    items: HashMap<BackendId, Backend>,
}

impl Backends {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find or create the backend for the given service port.
    pub fn acquire(
        &mut self,
        namespace: &str,
        name: &str,
        port: &str,
    ) -> &mut Backend {
        let id = BackendId::new(namespace, name, port);
        self.items.entry(id).or_insert_with_key(|id| {
            tracing::debug!(backend = %id, "Backend created");
            Backend::new(id)
        })
    }

    pub fn find(&self, id: &BackendId) -> Option<&Backend> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All backends ordered by identity.
    pub fn items(&self) -> Vec<&Backend> {
        let mut ids: Vec<&BackendId> = self.items.keys().collect();
        ids.sort();
        ids.into_iter().filter_map(|id| self.items.get(id)).collect()
    }
}
