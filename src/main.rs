//! Ingress host registry (v1)
//!
//! Applies a desired-state file to the host registry and reports which hosts
//! a proxy reload has to touch.
//!
//! # Architecture Overview
//!
//! ```text
//!   ingress.toml ──▶ config loader ──▶ sync::Converter ──▶ ChangeSet ──▶ stdout
//!        ▲              + validation        │                 │
//!        │                                  ▼                 ▼
//!   watcher / SIGHUP               hosts::Hosts registry   metrics
//!                                  (acquire / remove /
//!                                   shrink / commit)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use ingress_registry::config::loader::load_config;
use ingress_registry::config::watcher::ConfigWatcher;
use ingress_registry::lifecycle::{SignalEvent, SignalListener};
use ingress_registry::observability::{logging, metrics};
use ingress_registry::{Converter, RegistryConfig, ReloadKind};

#[derive(Parser)]
#[command(name = "ingress-registry")]
#[command(about = "Sync a desired-state file into the ingress host registry", long_about = None)]
struct Cli {
    /// Desired-state file (TOML).
    #[arg(short, long, default_value = "ingress.toml")]
    config: PathBuf,

    /// Keep running and resync whenever the file changes.
    #[arg(short, long)]
    watch: bool,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,

    /// Print change sets as JSON.
    #[arg(long)]
    json: bool,

    /// Print the current hosts as JSON after every cycle that changed them.
    #[arg(long)]
    dump: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::init_logging(&config.observability, cli.log_level.as_deref())?;

    tracing::info!(
        path = %cli.config.display(),
        hosts = config.hosts.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let mut converter = Converter::new();
    run_cycle(&mut converter, &config, &cli)?;

    if !cli.watch {
        return Ok(());
    }

    let (watcher, mut updates) = ConfigWatcher::new(&cli.config, Some(config.clone()));
    let _watcher = watcher.run()?;
    let mut signals = SignalListener::new()?;

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(config) => run_cycle(&mut converter, &config, &cli)?,
                None => break,
            },
            event = signals.recv() => match event {
                SignalEvent::Reload => match load_config(&cli.config) {
                    Ok(config) => run_cycle(&mut converter, &config, &cli)?,
                    Err(e) => tracing::error!("Failed to reload config: {}. Keeping current hosts.", e),
                },
                SignalEvent::Shutdown => {
                    tracing::info!("Shutdown signal received");
                    break;
                }
            },
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Sync one snapshot, report the delta and commit it.
fn run_cycle(
    converter: &mut Converter,
    config: &RegistryConfig,
    cli: &Cli,
) -> Result<(), serde_json::Error> {
    let changes = converter.sync(config);
    metrics::record_sync(&changes, converter.hosts().len());

    if cli.json {
        println!("{}", serde_json::to_string(&changes)?);
    } else {
        println!(
            "reload={} added=[{}] removed=[{}] updated=[{}]",
            changes.reload,
            changes.added.join(","),
            changes.removed.join(","),
            changes.updated.join(","),
        );
    }

    if changes.reload != ReloadKind::Skip {
        let hosts = converter.hosts();
        if cli.dump {
            let sorted = hosts.build_sorted_items().unwrap_or_default();
            let dump = serde_json::json!({
                "default_host": hosts.default_host(),
                "hosts": sorted,
                "ssl_passthrough": hosts.has_ssl_passthrough(),
                "var_namespace": hosts.has_var_namespace(),
            });
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
        for host in hosts.build_sorted_items().into_iter().flatten() {
            tracing::debug!(host = %host, "Host");
        }
    }

    // there is no proxy to reload here, so the cycle is closed right away
    converter.commit();
    Ok(())
}
