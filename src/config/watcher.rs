//! Desired-state file watcher.
//!
//! # Responsibilities
//! - Reload the desired-state file when it changes on disk
//! - Forward a snapshot to the sync loop only when its content changed
//!
//! # Design Decisions
//! - Watches the parent directory, so saves by atomic rename keep working
//! - A single save fires several events; equal snapshots are sent once
//! - Invalid snapshots are logged and dropped, the registry keeps its hosts

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RegistryConfig;

/// Decides which file events and snapshots reach the sync loop.
#[derive(Debug)]
pub struct SnapshotFilter {
    file_name: Option<OsString>,
    last_sent: Option<RegistryConfig>,
}

impl SnapshotFilter {
    /// Filter events of the file at `path`. `current` is the snapshot the
    /// sync loop already applied, if any.
    pub fn new(path: &Path, current: Option<RegistryConfig>) -> Self {
        Self {
            file_name: path.file_name().map(|name| name.to_os_string()),
            last_sent: current,
        }
    }

    /// True when the event may have changed the watched file.
    pub fn is_relevant(&self, event: &Event) -> bool {
        if !(event.kind.is_modify() || event.kind.is_create()) {
            return false;
        }
        event
            .paths
            .iter()
            .any(|p| p.file_name().map(|name| name.to_os_string()) == self.file_name)
    }

    /// Return the snapshot if it differs from the last one sent.
    pub fn accept(&mut self, config: RegistryConfig) -> Option<RegistryConfig> {
        if self.last_sent.as_ref() == Some(&config) {
            return None;
        }
        self.last_sent = Some(config.clone());
        Some(config)
    }
}

/// A watcher that monitors the desired-state file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    filter: SnapshotFilter,
    update_tx: mpsc::UnboundedSender<RegistryConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// `current` is the snapshot already synced; reloads equal to it are not
    /// sent. Returns the watcher and a receiver for configuration updates.
    pub fn new(
        path: &Path,
        current: Option<RegistryConfig>,
    ) -> (Self, mpsc::UnboundedReceiver<RegistryConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        let watcher = Self {
            path: path.to_path_buf(),
            filter: SnapshotFilter::new(path, current),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching in a background thread.
    ///
    /// The returned watcher must be kept alive for events to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, mut filter, update_tx } = self;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file = path.clone();

        let mut watcher = RecommendedWatcher::new(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!("Watch error: {:?}", e);
                    return;
                }
            };
            if !filter.is_relevant(&event) {
                return;
            }
            let config = match load_config(&file) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Failed to reload config: {}. Keeping current hosts.", e);
                    return;
                }
            };
            match filter.accept(config) {
                Some(config) => {
                    tracing::info!(path = ?file, "Config file changed, resyncing");
                    if update_tx.send(config).is_err() {
                        tracing::warn!("Sync loop is gone, dropping reloaded config");
                    }
                }
                None => tracing::debug!(kind = ?event.kind, "Config file content unchanged"),
            }
        }, Config::default().with_poll_interval(Duration::from_secs(2)))?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, dir = ?dir, "Config watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::HostConfig;
    use notify::event::{AccessKind, CreateKind, DataChange, EventKind, MetadataKind, ModifyKind};

    fn snapshot(hostnames: &[&str]) -> RegistryConfig {
        RegistryConfig {
            hosts: hostnames
                .iter()
                .map(|h| HostConfig {
                    hostname: h.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_repeated_save_events_send_once() {
        let path = Path::new("/etc/ingress/ingress.toml");
        let mut filter = SnapshotFilter::new(path, None);

        // one write: data change followed by a metadata change
        let data = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(path.to_path_buf());
        let meta = Event::new(EventKind::Modify(ModifyKind::Metadata(MetadataKind::WriteTime)))
            .add_path(path.to_path_buf());
        assert!(filter.is_relevant(&data));
        assert!(filter.is_relevant(&meta));

        assert!(filter.accept(snapshot(&["a.com"])).is_some());
        assert!(filter.accept(snapshot(&["a.com"])).is_none());
        assert!(filter.accept(snapshot(&["a.com", "b.com"])).is_some());
    }

    #[test]
    fn test_already_synced_snapshot_is_not_sent() {
        let mut filter = SnapshotFilter::new(Path::new("ingress.toml"), Some(snapshot(&["a.com"])));
        assert!(filter.accept(snapshot(&["a.com"])).is_none());
        assert!(filter.accept(snapshot(&[])).is_some());
    }

    #[test]
    fn test_only_watched_file_is_relevant() {
        let filter = SnapshotFilter::new(Path::new("/etc/ingress/ingress.toml"), None);

        // atomic rename: the editor creates the target from a temp file
        let renamed = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/etc/ingress/ingress.toml"));
        assert!(filter.is_relevant(&renamed));

        let sibling = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/etc/ingress/.ingress.toml.swp"));
        assert!(!filter.is_relevant(&sibling));

        let read = Event::new(EventKind::Access(AccessKind::Any))
            .add_path(PathBuf::from("/etc/ingress/ingress.toml"));
        assert!(!filter.is_relevant(&read));
    }
}
