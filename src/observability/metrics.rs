//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define registry metrics (host count, delta sizes, sync cycles)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `ingress_hosts` (gauge): current host count
//! - `ingress_hosts_added` (gauge): hosts added by the last cycle
//! - `ingress_hosts_removed` (gauge): hosts removed by the last cycle
//! - `ingress_hosts_updated` (gauge): hosts changed by the last cycle
//! - `ingress_sync_cycles_total` (counter): cycles by reload kind
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::sync::ChangeSet;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one sync cycle.
pub fn record_sync(changes: &ChangeSet, hosts: usize) {
    metrics::gauge!("ingress_hosts").set(hosts as f64);
    metrics::gauge!("ingress_hosts_added").set(changes.added.len() as f64);
    metrics::gauge!("ingress_hosts_removed").set(changes.removed.len() as f64);
    metrics::gauge!("ingress_hosts_updated").set(changes.updated.len() as f64);
    metrics::counter!("ingress_sync_cycles_total", "reload" => changes.reload.as_str())
        .increment(1);
}
