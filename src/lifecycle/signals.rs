//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGTERM, SIGINT, SIGHUP)
//! - Translate signals to internal events
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP triggers a resync from disk, not shutdown
//! - Only Ctrl-C is available off unix

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Event produced by an OS signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEvent {
    /// Stop the sync loop.
    Shutdown,
    /// Reload the desired state and run a sync cycle.
    Reload,
}

/// Listens for process signals.
pub struct SignalListener {
    #[cfg(unix)]
    terminate: Signal,
    #[cfg(unix)]
    hangup: Signal,
}

impl SignalListener {
    /// Register the handlers. Must be called from within a Tokio runtime.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            #[cfg(unix)]
            terminate: signal(SignalKind::terminate())?,
            #[cfg(unix)]
            hangup: signal(SignalKind::hangup())?,
        })
    }

    /// Wait for the next signal.
    #[cfg(unix)]
    pub async fn recv(&mut self) -> SignalEvent {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => SignalEvent::Shutdown,
            _ = self.terminate.recv() => SignalEvent::Shutdown,
            _ = self.hangup.recv() => SignalEvent::Reload,
        }
    }

    /// Wait for the next signal.
    #[cfg(not(unix))]
    pub async fn recv(&mut self) -> SignalEvent {
        let _ = tokio::signal::ctrl_c().await;
        SignalEvent::Shutdown
    }
}
